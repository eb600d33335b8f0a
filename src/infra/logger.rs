use env_logger::Builder;
use log::Level;
use std::io::Write;

pub fn setup_logger(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let env = env_logger::Env::default().filter_or("SUPERLS_LOG_LEVEL", level);

    Builder::from_env(env)
        .format(|buf, record| {
            let level_color = match record.level() {
                Level::Error => "31", // Red
                Level::Warn => "33",  // Yellow
                Level::Info => "32",  // Green
                Level::Debug => "36", // Cyan
                Level::Trace => "35", // Magenta
            };

            writeln!(
                buf,
                "\x1B[{}m[{}]\x1B[0m {}",
                level_color,
                record.level(),
                record.args()
            )
        })
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Once;

    static INIT: Once = Once::new();

    #[test]
    fn test_setup_logger() {
        INIT.call_once(|| {
            assert!(setup_logger(0).is_ok());
        });
    }
}
