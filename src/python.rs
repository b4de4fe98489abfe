use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::core::{RawJob, RawProfile};
use crate::ranking::Window;
use crate::MatchEngine as RustMatchEngine;

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyErr::new::<PyValueError, _>(e.to_string())
}

/// Python wrapper for MatchEngine.
///
/// Profiles and jobs are passed as JSON strings in the job store's schema;
/// results come back as JSON strings.
#[pyclass]
struct MatchEngine {
    engine: Arc<RustMatchEngine>,
}

#[pymethods]
impl MatchEngine {
    /// Create an engine, optionally from a JSON or YAML config file
    #[new]
    #[pyo3(signature = (config_path=None))]
    fn new(config_path: Option<String>) -> PyResult<Self> {
        let config = EngineConfig::load(config_path.as_deref().map(std::path::Path::new))
            .map_err(|e| PyErr::new::<PyRuntimeError, _>(e.to_string()))?;
        let engine = RustMatchEngine::new(config)
            .map_err(|e| PyErr::new::<PyRuntimeError, _>(e.to_string()))?;

        Ok(Self {
            engine: Arc::new(engine),
        })
    }

    /// Score breakdown of one job, as JSON
    fn score_job(&self, py: Python<'_>, profile_json: &str, job_json: &str) -> PyResult<String> {
        let raw_profile = RawProfile::from_json(profile_json).map_err(value_error)?;
        let raw_job = RawJob::from_json(job_json).map_err(value_error)?;

        let engine = self.engine.clone();
        py.allow_threads(move || {
            let profile = engine.normalize_profile(&raw_profile);
            let job = engine.normalize_job(&raw_job).map_err(value_error)?;
            engine.score_job(&profile, &job).to_json().map_err(value_error)
        })
    }

    /// Ranked page `{items, total, failed}`, as JSON
    #[pyo3(signature = (profile_json, jobs_json, skip=None, limit=None))]
    fn rank_jobs(
        &self,
        py: Python<'_>,
        profile_json: &str,
        jobs_json: &str,
        skip: Option<usize>,
        limit: Option<usize>,
    ) -> PyResult<String> {
        let raw_profile = RawProfile::from_json(profile_json).map_err(value_error)?;
        let raw_jobs = RawJob::list_from_json(jobs_json).map_err(value_error)?;
        let window = Window::new(skip.unwrap_or(0), limit.unwrap_or(20));

        let engine = self.engine.clone();
        py.allow_threads(move || {
            engine
                .rank_raw_jobs(&raw_profile, &raw_jobs, window)
                .to_json()
                .map_err(value_error)
        })
    }

    /// Name of the active ranker
    fn ranker(&self) -> String {
        self.engine.ranker_name().to_string()
    }
}

/// Python module
#[pymodule]
fn jobmatch_engine(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<MatchEngine>()?;
    m.add("__version__", crate::VERSION)?;
    Ok(())
}
