use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub trace_cycles: bool,

    #[serde(default = "default_print_stats")]
    pub print_stats: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace_cycles: false,
            print_stats: default_print_stats(),
        }
    }
}

fn default_print_stats() -> bool {
    true
}
