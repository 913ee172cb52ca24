/// Logs how long `$block` took when the `stats` feature is enabled, otherwise just runs it.
macro_rules! timed {
    ($name:literal, $block:block) => {{
        #[cfg(feature = "stats")]
        let start = std::time::Instant::now();

        let result = $block;

        #[cfg(feature = "stats")]
        bevy::log::debug!("{} in {:?}", $name, start.elapsed());

        result
    }};
}
