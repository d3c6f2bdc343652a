use anyhow::Context;

use furnish::ViewerConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config = ViewerConfig::default();
    if let Some(scene) = std::env::args().nth(1) {
        config = config.with_scene(scene);
    }

    let app = furnish::ViewerApp::new(config).context("failed to create event loop")?;
    app.run().context("viewer exited with an error")?;
    Ok(())
}
