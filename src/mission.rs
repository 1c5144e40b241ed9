//! Mission control: flies the probe from planet to planet and analyzes the result.
//!
//! A mission chooses one task, then for each leg picks a planet, travels
//! there, and performs the task. A probe whose health runs out stops the
//! mission before the task on that planet. Once the log is closed it is
//! read back and summarized.

use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;

use tracing::{debug, info, warn};

use crate::analysis::{self, AnalysisError, AnalysisSummary};
use crate::config::Config;
use crate::logbook::{LogError, MissionLog};
use crate::model::{Planet, ProbeStatus, TaskSelection};

/// Errors that stop a mission.
#[derive(Debug, thiserror::Error)]
pub enum MissionError {
    #[error("failed to write mission log {}: {source}", path.display())]
    Log { path: PathBuf, source: LogError },

    #[error("failed to read input: {0}")]
    Input(#[from] io::Error),
}

pub type Result<T> = core::result::Result<T, MissionError>;

/// Where mission decisions come from: a person at a prompt, flags, or a test script.
pub trait Navigator {
    /// The task to perform on every planet. Asked once per mission.
    fn choose_task(&mut self) -> io::Result<TaskSelection>;

    /// The destination of leg `leg` (1-based).
    fn choose_planet(&mut self, leg: u32) -> io::Result<Planet>;
}

/// What happened in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct Flight {
    pub task: TaskSelection,
    pub visited: Vec<Planet>,
    pub status: ProbeStatus,
    /// The probe malfunctioned before finishing every leg.
    pub terminated_early: bool,
}

/// A finished mission: the flight, where its log lives, and what analysis made of it.
#[derive(Debug)]
pub struct MissionReport {
    pub flight: Flight,
    pub log_path: PathBuf,
    pub analysis: core::result::Result<AnalysisSummary, AnalysisError>,
}

/// Runs missions with a fixed configuration.
pub struct Mission<'a> {
    config: &'a Config,
}

impl<'a> Mission<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Flies a full mission: creates the log, flies every leg, then analyzes the log.
    ///
    /// Failing to create or write the log stops the mission. Failing to
    /// analyze it does not; the failure is carried in the report.
    pub fn run(&self, navigator: &mut impl Navigator) -> Result<MissionReport> {
        let path = self.config.output.clone();
        let log_error = |source| MissionError::Log {
            path: path.clone(),
            source,
        };

        let mut log = MissionLog::create(&path).map_err(log_error)?;
        debug!(path = %path.display(), "mission log created");

        let flight = self.fly(&mut log, navigator)?;
        log.finish().map_err(log_error)?;

        let analysis = analysis::analyze_file(&path);
        match &analysis {
            Ok(summary) => info!(count = summary.count, "telemetry analyzed"),
            Err(e) => warn!("analysis skipped: {e}"),
        }

        Ok(MissionReport {
            flight,
            log_path: path,
            analysis,
        })
    }

    /// Flies every leg, writing each event to `log`.
    pub fn fly<W: Write>(
        &self,
        log: &mut MissionLog<W>,
        navigator: &mut impl Navigator,
    ) -> Result<Flight> {
        let log_error = |source| MissionError::Log {
            path: self.config.output.clone(),
            source,
        };

        let task = navigator.choose_task()?;
        let mut flight = Flight {
            task,
            visited: Vec::new(),
            status: ProbeStatus::default(),
            terminated_early: false,
        };

        for leg in 1..=self.config.visits {
            let planet = navigator.choose_planet(leg)?;

            thread::sleep(self.config.travel_delay());
            flight.status = flight
                .status
                .apply_travel_cost(self.config.fuel_per_leg, self.config.energy_per_leg);
            log.record_travel(planet, &planet.reading(), &flight.status)
                .map_err(log_error)?;
            flight.visited.push(planet);
            info!(%planet, leg, health = flight.status.health, "arrived");
            thread::sleep(self.config.settle_delay());

            if flight.status.is_disabled() {
                warn!(%planet, leg, "probe malfunctioned, mission terminated");
                flight.terminated_early = true;
                break;
            }

            log.record_task(planet, task).map_err(log_error)?;
        }

        Ok(flight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::fs;

    use tempfile::TempDir;

    use crate::logbook::INVALID_TASK_LINE;
    use crate::model::TaskKind;

    struct Scripted {
        task: TaskSelection,
        planets: VecDeque<Planet>,
        asked: Vec<u32>,
    }

    impl Scripted {
        fn new(task: Option<i64>, planets: &[Planet]) -> Self {
            Self {
                task: TaskSelection::from_choice(task),
                planets: planets.iter().copied().collect(),
                asked: Vec::new(),
            }
        }
    }

    impl Navigator for Scripted {
        fn choose_task(&mut self) -> io::Result<TaskSelection> {
            Ok(self.task)
        }

        fn choose_planet(&mut self, leg: u32) -> io::Result<Planet> {
            self.asked.push(leg);
            Ok(self.planets.pop_front().unwrap_or(Planet::Mars))
        }
    }

    fn quick_config(output: PathBuf) -> Config {
        Config {
            output,
            travel_delay_ms: 0,
            settle_delay_ms: 0,
            ..Config::default()
        }
    }

    fn fly_in_memory(config: &Config, navigator: &mut Scripted) -> (Flight, String) {
        let mut log = MissionLog::new(Vec::new());
        let flight = Mission::new(config).fly(&mut log, navigator).unwrap();
        let text = String::from_utf8(log.finish().unwrap()).unwrap();
        (flight, text)
    }

    #[test]
    fn full_mission_visits_three_planets() {
        let config = quick_config(PathBuf::from("unused.txt"));
        let mut nav = Scripted::new(
            Some(1),
            &[Planet::Mars, Planet::Jupiter, Planet::Saturn],
        );

        let (flight, text) = fly_in_memory(&config, &mut nav);

        assert_eq!(flight.visited, [Planet::Mars, Planet::Jupiter, Planet::Saturn]);
        assert!(!flight.terminated_early);
        assert_eq!(nav.asked, [1, 2, 3]);
        assert_eq!(text.matches("Task: Sample Collection").count(), 3);
        assert!(text.contains("Fuel: 85.00, Energy: 70.00, Health: 99.55"));
    }

    #[test]
    fn malfunction_skips_task_and_stops() {
        let config = Config {
            fuel_per_leg: 5_000.0,
            energy_per_leg: 5_000.0,
            ..quick_config(PathBuf::from("unused.txt"))
        };
        let mut nav = Scripted::new(
            Some(2),
            &[Planet::Jupiter, Planet::Saturn, Planet::Mars],
        );

        let (flight, text) = fly_in_memory(&config, &mut nav);

        assert!(flight.terminated_early);
        assert!(flight.status.is_disabled());
        assert_eq!(flight.visited, [Planet::Jupiter]);
        assert_eq!(nav.asked, [1]);
        assert!(text.contains("Arrived at Jupiter"));
        assert!(!text.contains("Performing task"));
    }

    #[test]
    fn malfunction_on_second_leg_never_reaches_third_planet() {
        let config = Config {
            fuel_per_leg: 3_000.0,
            energy_per_leg: 3_000.0,
            ..quick_config(PathBuf::from("unused.txt"))
        };
        let mut nav = Scripted::new(
            Some(3),
            &[Planet::Mars, Planet::Jupiter, Planet::Saturn],
        );

        let (flight, text) = fly_in_memory(&config, &mut nav);

        assert!(flight.terminated_early);
        assert_eq!(flight.visited, [Planet::Mars, Planet::Jupiter]);
        assert_eq!(text.matches("Performing task on").count(), 1);
        assert!(text.contains("Performing task on Mars..."));
        assert!(!text.contains("Performing task on Jupiter..."));
        assert!(!text.contains("Saturn"));
    }

    #[test]
    fn invalid_task_is_logged_on_every_planet() {
        let config = quick_config(PathBuf::from("unused.txt"));
        let mut nav = Scripted::new(Some(5), &[Planet::Saturn, Planet::Saturn, Planet::Mars]);

        let (flight, text) = fly_in_memory(&config, &mut nav);

        assert_eq!(flight.task, TaskSelection::Invalid { choice: Some(5) });
        assert_eq!(text.matches(INVALID_TASK_LINE).count(), 3);
        assert!(!text.contains("Task:"));
    }

    #[test]
    fn visits_follow_config() {
        let config = Config {
            visits: 1,
            ..quick_config(PathBuf::from("unused.txt"))
        };
        let mut nav = Scripted::new(Some(4), &[Planet::Saturn, Planet::Mars]);

        let (flight, text) = fly_in_memory(&config, &mut nav);

        assert_eq!(flight.visited, [Planet::Saturn]);
        assert!(text.contains("Task: Repair Space Probe"));
    }

    #[test]
    fn run_writes_log_and_analyzes_it() {
        let dir = TempDir::new().unwrap();
        let config = quick_config(dir.path().join("space_probe_data.txt"));
        let mut nav = Scripted::new(
            Some(1),
            &[Planet::Mars, Planet::Jupiter, Planet::Saturn],
        );

        let report = Mission::new(&config).run(&mut nav).unwrap();

        assert_eq!(report.log_path, config.output);
        assert!(fs::read_to_string(&config.output)
            .unwrap()
            .starts_with("Travelling to Mars...\n"));

        let summary = report.analysis.unwrap();
        assert_eq!(summary.count, 3);
        assert!((summary.temperature.min - -139.0).abs() < 1e-9);
        assert!((summary.magnetic_field.max - 428.0).abs() < 1e-9);
        assert!((summary.radiation.average - 310.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn early_termination_is_analyzed_like_any_mission() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            fuel_per_leg: 5_000.0,
            energy_per_leg: 5_000.0,
            ..quick_config(dir.path().join("log.txt"))
        };
        let mut nav = Scripted::new(Some(1), &[Planet::Saturn]);

        let report = Mission::new(&config).run(&mut nav).unwrap();

        assert!(report.flight.terminated_early);
        assert_eq!(report.analysis.unwrap().count, 1);
    }

    #[test]
    fn run_fails_when_log_cannot_be_created() {
        let dir = TempDir::new().unwrap();
        let config = quick_config(dir.path().join("missing").join("log.txt"));
        let mut nav = Scripted::new(Some(1), &[]);

        let err = Mission::new(&config).run(&mut nav).unwrap_err();
        assert!(matches!(err, MissionError::Log { .. }));
    }

    #[test]
    fn task_kind_is_carried_into_the_flight() {
        let config = quick_config(PathBuf::from("unused.txt"));
        let mut nav = Scripted::new(Some(3), &[]);

        let (flight, _) = fly_in_memory(&config, &mut nav);

        assert_eq!(flight.task.task(), Some(TaskKind::AnalyzeAtmosphere));
        assert_eq!(flight.visited, [Planet::Mars, Planet::Mars, Planet::Mars]);
    }
}
