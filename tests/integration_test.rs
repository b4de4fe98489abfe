use jobmatch_engine::ranking::{FinalScoreRanker, Ranker};
use jobmatch_engine::{
    rank_jobs, score_job, EngineConfig, JobPosting, MatchEngine, RawJob, RawProfile, UserProfile,
    Window, WorkMode, DEFAULT_WEIGHTS,
};
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn profile() -> UserProfile {
    UserProfile {
        id: Some("u-1".into()),
        skills: set(&["python", "sql", "spark"]),
        location: Some("casablanca".into()),
        preferred_work_modes: [WorkMode::Remote].into_iter().collect(),
        min_remuneration: Some(8000.0),
        ..UserProfile::default()
    }
}

/// Varied batch covering every branch of every criterion
fn batch(count: usize) -> Vec<JobPosting> {
    let skills = ["python", "sql", "docker", "spark", "java", "aws"];
    let locations = ["casablanca, morocco", "rabat", "casa", "paris"];
    let modes = [Some(WorkMode::Remote), Some(WorkMode::Hybrid), Some(WorkMode::OnSite), None];

    (0..count)
        .map(|i| {
            let mut job = JobPosting::new(i.to_string(), format!("Engineer {}", i), "Acme");
            job.required_skills = skills.iter().skip(i % 4).take(1 + i % 3).map(|s| s.to_string()).collect();
            job.location = (i % 5 != 0).then(|| locations[i % locations.len()].to_string());
            job.work_mode = modes[i % modes.len()];
            job.salary_max = (i % 3 == 0).then_some(5000.0 + (i % 7) as f64 * 1000.0);
            job.embedding_score = (i % 2 == 0).then_some((i % 10) as f64 / 10.0);
            job
        })
        .collect()
}

#[test]
fn test_documented_scenarios() {
    let profile = UserProfile {
        skills: set(&["python", "sql"]),
        location: Some("casablanca".into()),
        min_remuneration: Some(8000.0),
        ..UserProfile::default()
    };
    let mut job = JobPosting::new("1", "Data Engineer", "Acme");
    job.required_skills = set(&["python", "sql", "docker"]);
    job.location = Some("casablanca, morocco".into());
    job.salary_min = Some(6000.0);
    job.salary_max = Some(9000.0);

    let breakdown = score_job(&profile, &job);
    assert!((breakdown.skills - 0.4).abs() < 1e-12);
    assert_eq!(breakdown.location, 1.0);
    assert_eq!(breakdown.remuneration, 1.0);
    assert_eq!(breakdown.work_mode, 0.5);
    assert!(!breakdown.embedding_available);
}

#[test]
fn test_all_components_bounded() {
    let engine = MatchEngine::default();
    for job in batch(200) {
        let b = engine.score_job(&profile(), &job);
        for (name, value) in b.components() {
            assert!((0.0..=1.0).contains(&value), "{} out of range: {}", name, value);
        }
        assert!((0.0..=1.0).contains(&b.final_score));
    }
}

#[test]
fn test_scoring_is_deterministic() {
    let engine = MatchEngine::default();
    for job in batch(50) {
        let first = engine.score_job(&profile(), &job);
        let second = engine.score_job(&profile(), &job);
        assert_eq!(first.final_score.to_bits(), second.final_score.to_bits());
        assert_eq!(first, second);
    }
}

#[test]
fn test_adding_shared_skill_never_lowers_skills() {
    let mut job = JobPosting::new("1", "Engineer", "Acme");
    job.required_skills = set(&["python", "sql", "docker", "aws"]);

    let mut profile = UserProfile::default();
    let mut previous = score_job(&profile, &job).skills;
    for skill in ["python", "sql", "docker", "aws"] {
        profile.skills.insert(skill.to_string());
        let current = score_job(&profile, &job).skills;
        assert!(current >= previous);
        previous = current;
    }
}

#[test]
fn test_neutral_and_exact_location() {
    let mut job = JobPosting::new("1", "Engineer", "Acme");
    job.location = Some("rabat".into());

    assert_eq!(score_job(&UserProfile::default(), &job).location, 0.5);

    let profile = UserProfile {
        location: Some("rabat".into()),
        ..UserProfile::default()
    };
    assert_eq!(score_job(&profile, &job).location, 1.0);
}

#[test]
fn test_job_without_location_ranks_like_a_miss() {
    let mut elsewhere = JobPosting::new("elsewhere", "Engineer", "Acme");
    elsewhere.location = Some("paris".into());
    let unknown = JobPosting::new("unknown", "Engineer", "Acme");
    let mut local = JobPosting::new("local", "Engineer", "Acme");
    local.location = Some("casablanca".into());

    assert_eq!(score_job(&profile(), &unknown).location, 0.0);

    let page = rank_jobs(&profile(), vec![unknown, local, elsewhere], 0, 3);
    let ids: Vec<&str> = page.items.iter().map(|r| r.job.id.as_str()).collect();
    assert_eq!(ids, vec!["local", "unknown", "elsewhere"]);
    assert_eq!(page.items[1].final_score(), page.items[2].final_score());
}

#[test]
fn test_page_is_ordered_and_windowed() {
    let jobs = batch(40);
    let len = jobs.len();

    let page = rank_jobs(&profile(), jobs.clone(), 0, len);
    assert_eq!(page.total, len);
    assert_eq!(page.len(), len);
    for pair in page.items.windows(2) {
        assert!(pair[0].final_score() >= pair[1].final_score());
    }

    let past_end = rank_jobs(&profile(), jobs, len, 5);
    assert!(past_end.is_empty());
    assert_eq!(past_end.total, len);
}

#[test]
fn test_rule_only_ranking_matches_reweighted_rules() {
    let jobs: Vec<JobPosting> = batch(60)
        .into_iter()
        .map(|mut job| {
            job.embedding_score = None;
            job
        })
        .collect();

    let page = rank_jobs(&profile(), jobs, 0, usize::MAX);
    let reweighted = DEFAULT_WEIGHTS.without_embedding();
    let keys: Vec<f64> = page
        .items
        .iter()
        .map(|item| reweighted.apply_rules(&item.score.unwrap().rule_scores()))
        .collect();

    for pair in keys.windows(2) {
        assert!(pair[0] + 1e-12 >= pair[1]);
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let engine = MatchEngine::default();
    let jobs = batch(500);

    let sequential: Vec<_> = jobs
        .iter()
        .map(|job| (job.clone(), engine.score_job(&profile(), job)))
        .collect();
    let expected = FinalScoreRanker::new().rank(sequential, Window::new(10, 50));

    let parallel = engine.rank_jobs(&profile(), jobs, Window::new(10, 50));
    assert_eq!(parallel, expected);
}

#[test]
fn test_raw_batch_isolates_bad_job() {
    let engine = MatchEngine::default();
    let raw_profile = RawProfile::from_json(
        r#"{"id": 7, "skills": "Python, SQL", "location": "Casablanca",
            "preferred_mode_travail": ["télétravail"], "min_remuneration": "8000"}"#,
    )
    .unwrap();
    let raw_jobs: Vec<RawJob> = serde_json::from_value(json!([
        {"id": "a", "title": "Data Engineer", "competences_techniques": ["python", "sql"],
         "location": "Casablanca, Morocco", "mode_travail": "remote", "salary_max": 9000,
         "score_embedding": 0.9},
        {"id": "b", "title": "Broken", "salary_min": {}},
        {"id": "c", "title": "Java Developer", "required_skills": "java",
         "location": "Paris", "mode_travail": "on-site", "salary_max": "8500"}
    ]))
    .unwrap();

    let page = engine.rank_raw_jobs(&raw_profile, &raw_jobs, Window::all());
    assert_eq!(page.total, 3);
    assert_eq!(page.failed, 1);

    let ids: Vec<&str> = page.items.iter().map(|r| r.job.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c", "b"]);
    assert_eq!(page.items[2].final_score(), 0.0);
    // 0.3 * 0.4 + 0.15 * 3 + 0.25 * 0.9
    assert!((page.items[0].final_score() - 0.795).abs() < 1e-9);
}

#[test]
fn test_rerank_config_reorders_head() {
    let config = EngineConfig {
        ranking: jobmatch_engine::RankingConfig { rerank_top_k: Some(2) },
        ..EngineConfig::default()
    };
    let engine = MatchEngine::new(config).unwrap();

    let mut strong = JobPosting::new("strong", "Engineer", "Acme");
    strong.required_skills = set(&["python", "sql", "spark"]);
    strong.rerank_score = Some(0.2);
    let mut medium = JobPosting::new("medium", "Engineer", "Acme");
    medium.required_skills = set(&["python"]);
    medium.rerank_score = Some(0.9);
    let weak = JobPosting::new("weak", "Engineer", "Acme");

    let page = engine.rank_jobs(&profile(), vec![weak, strong, medium], Window::all());
    let ids: Vec<&str> = page.items.iter().map(|r| r.job.id.as_str()).collect();
    assert_eq!(ids, vec!["medium", "strong", "weak"]);
}

#[test]
fn test_page_serialization_shape() {
    let page = rank_jobs(&profile(), batch(3), 0, 3);
    let value: serde_json::Value = serde_json::from_str(&page.to_json().unwrap()).unwrap();

    assert_eq!(value["total"], 3);
    let score = &value["items"][0]["score"];
    for key in ["skills", "location", "work_mode", "remuneration", "embedding", "final"] {
        assert!(score[key].is_number(), "missing {}", key);
    }
}

#[test]
fn test_block_on_async_ranking() {
    let engine = Arc::new(MatchEngine::default());
    let page = tokio_test::block_on(engine.rank_jobs_async(profile(), batch(10), Window::new(0, 3)))
        .unwrap();
    assert_eq!(page.len(), 3);
}

#[tokio::test]
async fn test_async_ranking_under_timeout() {
    let engine = Arc::new(MatchEngine::default());
    let page = tokio::time::timeout(
        Duration::from_secs(10),
        engine.clone().rank_jobs_async(profile(), batch(1000), Window::new(0, 20)),
    )
    .await
    .expect("ranking timed out")
    .unwrap();

    assert_eq!(page.total, 1000);
    assert_eq!(page.len(), 20);
}
