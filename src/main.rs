use grid_raycaster::{App, Config, Demo};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::default();
    log::info!(
        "{}x{} viewport, {} columns over {} degrees, {}x{} map",
        config.viewport_width,
        config.viewport_height,
        config.column_count,
        config.fov_degrees,
        config.map_width,
        config.map_height
    );

    let demo = Demo::new(config)?;
    App::new("Raycaster", config.viewport_width, config.viewport_height, demo).run()?;
    Ok(())
}
