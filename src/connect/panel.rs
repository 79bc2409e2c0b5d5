//! Binding of the connection fields to a [`ConnectConfig`]

use log::{debug, warn};
use serde::Serialize;

use super::config::{ConnectConfig, HttpConfig, ReverseWsConfig, WsConfig};
use super::error::{BindingError, BindingResult};
use super::field::{config_values, Field, FieldId, FieldValue};
use super::rules::{connect_rules, Effect, Rule};

// Rules setting values may trigger further rules; this bounds the chain
const MAX_RULE_DEPTH: usize = 8;

/// Change notifications for the UI layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum PanelEvent {
    FieldChange { field: FieldId, value: FieldValue },
    VisibilityChanged { field: FieldId, visible: bool },
}

type Listener = Box<dyn FnMut(&PanelEvent)>;

/// Editable view of a [`ConnectConfig`]
pub struct ConnectPanel {
    fields: Vec<Field>,
    rules: Vec<Rule>,
    listeners: Vec<Listener>,
}

impl std::fmt::Debug for ConnectPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectPanel")
            .field("fields", &self.fields)
            .field("rules", &self.rules)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ConnectPanel {
    /// Builds the page, filled from `config` when given, defaults otherwise
    pub fn new(config: Option<&ConnectConfig>) -> Self {
        Self::with_rules(config, connect_rules())
    }

    pub fn with_rules(config: Option<&ConnectConfig>, rules: Vec<Rule>) -> Self {
        let fields = config_values(&ConnectConfig::default())
            .into_iter()
            .map(|(id, value)| Field {
                id,
                value,
                visible: true,
            })
            .collect();

        let mut panel = Self {
            fields,
            rules,
            listeners: Vec::new(),
        };
        match config {
            Some(config) => panel.fill(config),
            None => panel.refresh_visibility(),
        }
        panel
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Fields currently shown, in display order
    pub fn visible_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.visible)
    }

    /// Fields are stored in `FieldId` declaration order, so the id is the index
    pub fn field(&self, id: FieldId) -> &Field {
        &self.fields[id as usize]
    }

    pub fn value(&self, id: FieldId) -> &FieldValue {
        &self.field(id).value
    }

    pub fn is_visible(&self, id: FieldId) -> bool {
        self.field(id).visible
    }

    /// Registers a listener for value and visibility changes
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&PanelEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Replaces every field with the values from `config`.
    ///
    /// Only visibility rules run; edit-triggered rules are left alone so the
    /// loaded config reads back unchanged.
    pub fn fill(&mut self, config: &ConnectConfig) {
        for (id, value) in config_values(config) {
            self.assign(id, value);
        }
        self.refresh_visibility();
    }

    /// Edits a field and applies the rules depending on it
    pub fn set(&mut self, id: FieldId, value: FieldValue) -> BindingResult<()> {
        if id.kind() != value.kind() {
            return Err(BindingError::TypeMismatch {
                field: id,
                expected: id.kind(),
            });
        }
        let value = match value {
            FieldValue::Urls(urls) => FieldValue::Urls(normalize_urls(id, urls)?),
            other => other,
        };

        self.assign(id, value);
        self.apply_rules(id, 0);
        Ok(())
    }

    /// Appends a URL to a list field
    pub fn add_url(&mut self, id: FieldId, url: &str) -> BindingResult<()> {
        let mut urls = self.urls_mut_copy(id)?;
        let url = url.trim();
        id.validate_url(url)?;
        if urls.iter().any(|existing| existing == url) {
            return Err(BindingError::DuplicateUrl {
                url: url.to_string(),
            });
        }
        urls.push(url.to_string());

        self.assign(id, FieldValue::Urls(urls));
        self.apply_rules(id, 0);
        Ok(())
    }

    /// Removes the URL at `index` from a list field and returns it
    pub fn remove_url(&mut self, id: FieldId, index: usize) -> BindingResult<String> {
        let mut urls = self.urls_mut_copy(id)?;
        if index >= urls.len() {
            return Err(BindingError::IndexOutOfRange { index });
        }
        let removed = urls.remove(index);

        self.assign(id, FieldValue::Urls(urls));
        self.apply_rules(id, 0);
        Ok(removed)
    }

    /// Reads the current field states back into a config
    pub fn get_value(&self) -> ConnectConfig {
        ConnectConfig {
            http: HttpConfig {
                enable: self.bool_of(FieldId::HttpEnable),
                host: self.text_of(FieldId::HttpHost),
                port: self.port_of(FieldId::HttpPort),
                secret: self.text_of(FieldId::HttpSecret),
                enable_heart: self.bool_of(FieldId::HttpEnableHeart),
                enable_post: self.bool_of(FieldId::HttpEnablePost),
                post_urls: self.urls_of(FieldId::HttpPostUrls),
            },
            ws: WsConfig {
                enable: self.bool_of(FieldId::WsEnable),
                host: self.text_of(FieldId::WsHost),
                port: self.port_of(FieldId::WsPort),
            },
            reverse_ws: ReverseWsConfig {
                enable: self.bool_of(FieldId::ReverseWsEnable),
                urls: self.urls_of(FieldId::ReverseWsUrls),
            },
        }
    }

    /// Resets every field to its default
    pub fn clear(&mut self) {
        self.fill(&ConnectConfig::default());
    }

    fn assign(&mut self, id: FieldId, value: FieldValue) {
        let field = &mut self.fields[id as usize];
        if field.value == value {
            return;
        }
        field.value = value.clone();
        debug!("Field {} changed to {:?}", id, value);
        self.emit(PanelEvent::FieldChange { field: id, value });
    }

    fn set_visible(&mut self, id: FieldId, visible: bool) {
        let field = &mut self.fields[id as usize];
        if field.visible == visible {
            return;
        }
        field.visible = visible;
        self.emit(PanelEvent::VisibilityChanged { field: id, visible });
    }

    fn apply_rules(&mut self, changed: FieldId, depth: usize) {
        if depth >= MAX_RULE_DEPTH {
            warn!("Rule chain starting at {} is too deep, stopping", changed);
            return;
        }

        let triggered: Vec<Rule> = self
            .rules
            .iter()
            .filter(|rule| rule.when.field() == changed)
            .copied()
            .collect();

        for rule in triggered {
            let holds = rule.when.holds(self.value(changed));
            match rule.then {
                Effect::Show(target) => self.set_visible(target, holds),
                Effect::SetChecked(target, checked) if holds => {
                    if self.value(target).as_bool() != Some(checked) {
                        self.assign(target, FieldValue::Bool(checked));
                        self.apply_rules(target, depth + 1);
                    }
                }
                Effect::SetChecked(..) => {}
            }
        }
    }

    fn refresh_visibility(&mut self) {
        let level_rules: Vec<Rule> = self
            .rules
            .iter()
            .filter(|rule| rule.is_level_triggered())
            .copied()
            .collect();
        for rule in level_rules {
            if let Effect::Show(target) = rule.then {
                let holds = rule.when.holds(self.value(rule.when.field()));
                self.set_visible(target, holds);
            }
        }
    }

    fn emit(&mut self, event: PanelEvent) {
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    fn urls_mut_copy(&self, id: FieldId) -> BindingResult<Vec<String>> {
        self.value(id)
            .as_urls()
            .map(<[String]>::to_vec)
            .ok_or(BindingError::NotAUrlList { field: id })
    }

    fn bool_of(&self, id: FieldId) -> bool {
        self.value(id).as_bool().unwrap_or_default()
    }

    fn text_of(&self, id: FieldId) -> String {
        self.value(id).as_text().unwrap_or_default().to_string()
    }

    fn port_of(&self, id: FieldId) -> u16 {
        self.value(id).as_port().unwrap_or_default()
    }

    fn urls_of(&self, id: FieldId) -> Vec<String> {
        self.value(id).as_urls().map(<[String]>::to_vec).unwrap_or_default()
    }
}

impl Default for ConnectPanel {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Trims every entry, then checks scheme and uniqueness on the trimmed form
fn normalize_urls(id: FieldId, urls: Vec<String>) -> BindingResult<Vec<String>> {
    let mut normalized: Vec<String> = Vec::with_capacity(urls.len());
    for url in urls {
        let url = url.trim();
        id.validate_url(url)?;
        if normalized.iter().any(|existing| existing == url) {
            return Err(BindingError::DuplicateUrl {
                url: url.to_string(),
            });
        }
        normalized.push(url.to_string());
    }
    Ok(normalized)
}
