//! Python bindings, built with the `python` feature.

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::constants::POINTS_TABLE;
use crate::driver::Driver;
use crate::error::{ChampionshipError, ConfigError};
use crate::luck::RandomLuck;
use crate::roster::{self, RosterConfig};
use crate::season::{self, SeasonResult};
use crate::tiebreak;
use crate::track::Track;

impl From<ChampionshipError> for PyErr {
    fn from(err: ChampionshipError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

fn config_err(err: ConfigError) -> PyErr {
    match err {
        ConfigError::Io { .. } => PyIOError::new_err(err.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

fn luck_for(seed: Option<u64>) -> RandomLuck<rand_chacha::ChaCha8Rng> {
    match seed {
        Some(s) => RandomLuck::seeded(s),
        None => RandomLuck::from_entropy(),
    }
}

#[pyclass(name = "Driver")]
#[derive(Clone)]
pub struct PyDriver {
    inner: Driver,
}

#[pymethods]
impl PyDriver {
    #[new]
    fn new(name: String, skill: u8, consistency: u8) -> Self {
        PyDriver {
            inner: Driver::new(name, skill, consistency),
        }
    }

    #[getter]
    fn name(&self) -> String {
        self.inner.name.clone()
    }

    #[getter]
    fn skill(&self) -> u8 {
        self.inner.skill
    }

    #[getter]
    fn consistency(&self) -> u8 {
        self.inner.consistency
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "Driver({:?}, {}, {})",
            self.inner.name, self.inner.skill, self.inner.consistency
        )
    }
}

#[pyclass(name = "Track")]
#[derive(Clone)]
pub struct PyTrack {
    inner: Track,
}

#[pymethods]
impl PyTrack {
    #[new]
    fn new(name: String, difficulty: f64, speed_bias: f64) -> Self {
        PyTrack {
            inner: Track::new(name, difficulty, speed_bias),
        }
    }

    #[getter]
    fn name(&self) -> String {
        self.inner.name.clone()
    }

    #[getter]
    fn difficulty(&self) -> f64 {
        self.inner.difficulty
    }

    #[getter]
    fn speed_bias(&self) -> f64 {
        self.inner.speed_bias
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "Track({:?}, {}, {})",
            self.inner.name, self.inner.difficulty, self.inner.speed_bias
        )
    }
}

/// Final standings and race results of a simulated season.
#[pyclass(name = "SeasonResult")]
#[derive(Clone)]
pub struct PySeasonResult {
    inner: SeasonResult,
}

#[pymethods]
impl PySeasonResult {
    /// Final standings as (driver name, points), leader first.
    #[getter]
    fn standings(&self) -> Vec<(String, u32)> {
        self.inner
            .standings
            .entries
            .iter()
            .map(|e| (e.driver.name.clone(), e.points))
            .collect()
    }

    /// Each race as (track name, [(driver name, score, points)]).
    #[getter]
    fn races(&self) -> Vec<(String, Vec<(String, f64, u32)>)> {
        self.inner
            .races
            .iter()
            .map(|r| {
                let placings = r
                    .result
                    .placings
                    .iter()
                    .map(|p| (p.driver.name.clone(), p.score, p.points))
                    .collect();
                (r.track.name.clone(), placings)
            })
            .collect()
    }

    /// Serialize the full result as JSON.
    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner).map_err(|e| PyValueError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        format!("SeasonResult({} races)", self.inner.races.len())
    }
}

#[pyfunction]
#[pyo3(signature = (drivers, tracks, seed = None))]
fn run_season(drivers: Vec<PyDriver>, tracks: Vec<PyTrack>, seed: Option<u64>) -> PyResult<PySeasonResult> {
    let roster: Vec<Driver> = drivers.into_iter().map(|d| d.inner).collect();
    let schedule: Vec<Track> = tracks.into_iter().map(|t| t.inner).collect();
    let inner = season::run_season(&roster, &schedule, &mut luck_for(seed))?;
    Ok(PySeasonResult { inner })
}

/// Returns (champion name, season points, decided by tie-break).
#[pyfunction]
#[pyo3(signature = (season, tie_break_track, seed = None))]
fn resolve_champion(
    season: &PySeasonResult,
    tie_break_track: &PyTrack,
    seed: Option<u64>,
) -> PyResult<(String, u32, bool)> {
    let result = tiebreak::resolve_champion(
        &season.inner.standings,
        &tie_break_track.inner,
        &mut luck_for(seed),
    )?;
    Ok((result.champion.name.clone(), result.points, result.via_tie_break()))
}

/// Returns [(driver name, titles, probability, (low, high))], favourite first.
#[pyfunction]
#[pyo3(signature = (drivers, tracks, tie_break_track, simulations, seed = 0))]
fn title_odds(
    drivers: Vec<PyDriver>,
    tracks: Vec<PyTrack>,
    tie_break_track: &PyTrack,
    simulations: usize,
    seed: u64,
) -> PyResult<Vec<(String, usize, f64, (f64, f64))>> {
    let roster: Vec<Driver> = drivers.into_iter().map(|d| d.inner).collect();
    let schedule: Vec<Track> = tracks.into_iter().map(|t| t.inner).collect();
    let odds = crate::odds::title_odds(&roster, &schedule, &tie_break_track.inner, simulations, seed)?;
    Ok(odds
        .into_iter()
        .map(|o| (o.driver.name, o.titles, o.probability, o.interval))
        .collect())
}

#[pyfunction]
fn default_drivers() -> Vec<PyDriver> {
    roster::default_drivers()
        .into_iter()
        .map(|inner| PyDriver { inner })
        .collect()
}

#[pyfunction]
fn default_tracks() -> Vec<PyTrack> {
    roster::default_tracks()
        .into_iter()
        .map(|inner| PyTrack { inner })
        .collect()
}

#[pyfunction]
fn tie_break_track() -> PyTrack {
    PyTrack {
        inner: roster::tie_break_track(),
    }
}

/// Load a JSON roster file, returning (drivers, tracks, tie-break track).
#[pyfunction]
fn load_roster(path: &str) -> PyResult<(Vec<PyDriver>, Vec<PyTrack>, PyTrack)> {
    let config = RosterConfig::from_path(path).map_err(config_err)?;
    Ok((
        config.drivers.into_iter().map(|inner| PyDriver { inner }).collect(),
        config.tracks.into_iter().map(|inner| PyTrack { inner }).collect(),
        PyTrack {
            inner: config.tie_break_track,
        },
    ))
}

/// Python module definition
#[pymodule]
fn grandprix_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Classes
    m.add_class::<PyDriver>()?;
    m.add_class::<PyTrack>()?;
    m.add_class::<PySeasonResult>()?;

    // Engine
    m.add_function(wrap_pyfunction!(run_season, m)?)?;
    m.add_function(wrap_pyfunction!(resolve_champion, m)?)?;
    m.add_function(wrap_pyfunction!(title_odds, m)?)?;

    // Roster
    m.add_function(wrap_pyfunction!(default_drivers, m)?)?;
    m.add_function(wrap_pyfunction!(default_tracks, m)?)?;
    m.add_function(wrap_pyfunction!(tie_break_track, m)?)?;
    m.add_function(wrap_pyfunction!(load_roster, m)?)?;

    // Constants
    m.add("POINTS_TABLE", POINTS_TABLE.to_vec())?;

    Ok(())
}
