use std::sync::Once;

static INIT: Once = Once::new();

/// Installs a warn level subscriber once per test binary.
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("warn"))
            .with_test_writer()
            .try_init();
    });
}

/// Round robin seasons among four teams. Alabama wins every game, and the
/// home side wins six of eight.
pub fn home_leaning_csv(first_period: u16, last_period: u16) -> String {
    let mut csv = String::new();
    for period in first_period..=last_period {
        for (round, visitor, home) in [
            (1, "Baylor", "Alabama"),
            (2, "Clemson", "Alabama"),
            (3, "Duke", "Alabama"),
            (4, "Clemson", "Baylor"),
            (5, "Duke", "Clemson"),
            (6, "Baylor", "Duke"),
        ] {
            csv.push_str(&format!("{period},{round},{visitor},13,{home},27\n"));
        }
        for (round, visitor, home) in [(7, "Alabama", "Duke"), (8, "Clemson", "Baylor")] {
            csv.push_str(&format!("{period},{round},{visitor},31,{home},24\n"));
        }
    }
    csv
}
