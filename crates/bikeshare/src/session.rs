//! The interactive analysis loop.

use crate::browser::RawDataBrowser;
use crate::config::ExplorerConfig;
use crate::console::Console;
use crate::error::Result;
use crate::filters::FilterResolver;
use crate::loader::DatasetLoader;
use crate::stats::report_all;
use tracing::{error, info};

const RAW_DATA_PROMPT: &str = "Would you like to see the raw data? Enter yes or no: ";
const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no: ";

/// Drives filter resolution, loading, reporting and browsing, cycle after
/// cycle.
#[derive(Debug, Clone)]
pub struct Explorer {
    resolver: FilterResolver,
    loader: DatasetLoader,
    browser: RawDataBrowser,
}

impl Explorer {
    pub fn new(config: &ExplorerConfig) -> Self {
        Self {
            resolver: FilterResolver::new(config),
            loader: DatasetLoader::new(config),
            browser: RawDataBrowser::new(config),
        }
    }

    /// Run cycles until the user declines to restart or input ends.
    pub fn run(&self, console: &mut dyn Console) -> Result<()> {
        let mut cycles = 0usize;
        loop {
            cycles += 1;
            match self.run_cycle(console) {
                Ok(true) => continue,
                Ok(false) => break,
                Err(e) if e.is_input_closed() => {
                    info!("Input closed, ending session");
                    break;
                }
                Err(e) => {
                    error!(code = e.error_code(), "Session aborted: {}", e);
                    return Err(e);
                }
            }
        }
        info!("Session finished after {} cycle(s)", cycles);
        Ok(())
    }

    /// One full analysis. Returns whether the user wants another.
    pub fn run_cycle(&self, console: &mut dyn Console) -> Result<bool> {
        let spec = self.resolver.resolve(console)?;
        info!("Analyzing {}", spec);

        let mut df = self.loader.load(&spec, console)?;
        report_all(&mut df, console.out())?;

        if console.confirm(RAW_DATA_PROMPT)? {
            self.browser.browse(&df, console)?;
        }

        console.confirm(RESTART_PROMPT)
    }
}
