use anyhow::Context;

/// The entry point of the application.
/// Initializes logging and runs the application, reporting any initialization or runtime errors.
fn main() -> anyhow::Result<()> {
    napcat_desktop_lib::run().context("napcat-desktop failed")
}
