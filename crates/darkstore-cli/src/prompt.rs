//! Interactive terminal implementation of [`SelectionProvider`].
//!
//! Candidate lists are shown with 1-based ordinals, matching what the
//! pipeline validates the answer against.

use std::io::{self, BufRead, Write};

use darkstore_pipeline::{CrawlError, SelectionProvider};

pub struct TerminalSelections;

impl TerminalSelections {
    fn read_line(prompt: &str) -> Result<String, CrawlError> {
        println!("{prompt}");
        io::stdout().flush().ok();
        let mut line = String::new();
        let read = io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| CrawlError::Selection {
                reason: e.to_string(),
            })?;
        if read == 0 {
            return Err(CrawlError::Selection {
                reason: "stdin closed".to_string(),
            });
        }
        Ok(line.trim().to_string())
    }

    fn choose(kind: &str, candidates: &[String]) -> Result<usize, CrawlError> {
        println!("Available {kind} options:");
        for (index, label) in candidates.iter().enumerate() {
            println!("{}: {label}", index + 1);
        }
        let line = Self::read_line(&format!("Choose a {kind} by number:"))?;
        line.parse::<usize>().map_err(|e| CrawlError::Selection {
            reason: format!("\"{line}\" is not a number: {e}"),
        })
    }
}

impl SelectionProvider for TerminalSelections {
    fn input_city_query(&mut self) -> Result<String, CrawlError> {
        Self::read_line("Enter a city:")
    }

    fn input_street_query(&mut self) -> Result<String, CrawlError> {
        Self::read_line("Enter a street and building:")
    }

    fn choose_city(&mut self, candidates: &[String]) -> Result<usize, CrawlError> {
        Self::choose("city", candidates)
    }

    fn choose_address(&mut self, candidates: &[String]) -> Result<usize, CrawlError> {
        Self::choose("address", candidates)
    }
}
