use feria::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // FERIA_CONFIG points at a YAML file; defaults apply otherwise
    let config = match std::env::var("FERIA_CONFIG") {
        Ok(path) => AppConfig::from_yaml_file(&path)?,
        Err(_) => AppConfig::default(),
    };

    let catalog = Catalog::new();
    let bus = ListingBus::new(config.event_capacity);
    let state = AppState::new(catalog, bus);

    serve(&config, build_router(state)).await
}
