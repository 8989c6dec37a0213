use play_config::config::FileSource;
use play_config::Variant;

fn main() -> Result<(), play_config::Error> {
    let container = FileSource::new("demos/play.toml", true).load()?;

    for variant in [
        Variant::new("freeDebug", "debug").with_flavor("free"),
        Variant::new("paidRelease", "release").with_flavor("paid"),
    ] {
        let config = container.resolve(&variant)?;
        println!(
            "{}: track={} status={:?} fraction={:?} retain={:?}",
            variant.name,
            config.track,
            config.release_status,
            config.user_fraction,
            config.retain_artifacts
        );
    }

    Ok(())
}
