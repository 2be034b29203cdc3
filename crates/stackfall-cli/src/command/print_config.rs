use stackfall_engine::EngineConfig;

pub(crate) fn run() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&EngineConfig::default())?;
    println!("{json}");
    Ok(())
}
