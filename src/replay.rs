use crate::error::Error;
use crate::grid::{Dimensions, Position};
use serde_json::json;
use std::{fs::File, io::BufWriter, io::Write};
use tracing::info;

pub fn create_replay_logger(
    filename: Option<String>,
    dimensions: Dimensions,
) -> Box<dyn ReplayLogger> {
    match filename {
        None => Box::new(NoOpReplayLogger {}),
        Some(filename) => Box::new(JsonReplayLogger::new(filename, dimensions)),
    }
}

/// Records how a run evolves, one entry per generation.
pub trait ReplayLogger: Send + Sync {
    #[allow(unused_variables)]
    fn log_initial(&mut self, generation: usize, live_cells: Vec<Position>) {}

    #[allow(unused_variables)]
    fn log_generation(
        &mut self,
        generation: usize,
        population: usize,
        births: usize,
        deaths: usize,
    ) {
    }

    fn clear(&mut self) {}

    fn save(&self) -> Result<(), Error> {
        Ok(())
    }
}

#[derive(serde::Serialize)]
struct Generation {
    generation: usize,
    population: usize,
    births: usize,
    deaths: usize,
}

struct NoOpReplayLogger;
impl ReplayLogger for NoOpReplayLogger {}

struct JsonReplayLogger {
    filename: String,
    dimensions: Dimensions,
    start_generation: usize,
    initial: Vec<Position>,
    generations: Vec<Generation>,
}

impl JsonReplayLogger {
    fn new(filename: String, dimensions: Dimensions) -> JsonReplayLogger {
        JsonReplayLogger {
            filename,
            dimensions,
            start_generation: 0,
            initial: Vec::new(),
            generations: Vec::new(),
        }
    }
}

impl ReplayLogger for JsonReplayLogger {
    fn log_initial(&mut self, generation: usize, live_cells: Vec<Position>) {
        self.start_generation = generation;
        self.initial = live_cells;
    }

    fn log_generation(
        &mut self,
        generation: usize,
        population: usize,
        births: usize,
        deaths: usize,
    ) {
        self.generations.push(Generation {
            generation,
            population,
            births,
            deaths,
        });
    }

    fn clear(&mut self) {
        self.start_generation = 0;
        self.initial.clear();
        self.generations.clear();
    }

    fn save(&self) -> Result<(), Error> {
        let file = File::create(&self.filename)?;

        let data = json!({
            "dimensions": self.dimensions,
            "start_generation": self.start_generation,
            "initial": self.initial,
            "generations": self.generations,
        });

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &data)?;
        writer.flush()?;

        info!(
            filename = %self.filename,
            generations = self.generations.len(),
            "replay saved"
        );
        Ok(())
    }
}
