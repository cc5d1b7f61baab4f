//! HackerRank adapter.
//!
//! HackerRank exposes no public API, so stats are synthesized from the
//! username: the seed is the sum of its char codes, and every quantity is
//! drawn through the same fixed linear-congruential step. The generator is a
//! pure function of the seed, so a given username always renders the same
//! dashboard (dates are offsets from the supplied clock).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HackerrankStats {
    pub username: String,
    pub profile_url: String,
    pub rank: i64,
    pub percentile: f64,
    pub badges: Vec<Badge>,
    pub skills: Vec<String>,
    pub certificates: Vec<Certificate>,
    pub contests: Vec<ContestResult>,
    pub recent_submissions: Vec<Submission>,
    pub problem_solving: ProblemSolving,
    pub total_submissions: i64,
    pub successful_submissions: i64,
    pub last_active: DateTime<Utc>,
    pub active_days: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub name: String,
    pub stars: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    pub name: String,
    /// YYYY-MM-DD
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestResult {
    pub name: String,
    pub rank: i64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub problem: String,
    pub date: DateTime<Utc>,
    pub language: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemSolving {
    pub total: i64,
    pub algorithms: i64,
    pub data_structures: i64,
    pub mathematics: i64,
}

const BADGE_NAMES: [&str; 8] = [
    "Problem Solving",
    "Java",
    "Python",
    "Algorithms",
    "Data Structures",
    "C++",
    "SQL",
    "30 Days of Code",
];

const CERTIFICATE_NAMES: [&str; 7] = [
    "Problem Solving (Basic)",
    "Problem Solving (Intermediate)",
    "Python (Basic)",
    "Java (Basic)",
    "SQL (Basic)",
    "SQL (Intermediate)",
    "JavaScript (Basic)",
];

const CONTEST_NAMES: [&str; 5] = [
    "Week of Code 38",
    "University CodeSprint 5",
    "HackLand CodeSprint",
    "World CodeSprint 13",
    "HourRank 31",
];

const SUBMISSION_CATALOG: [(&str, &str, &str); 8] = [
    ("Diagonal Difference", "Python", "Accepted"),
    ("Birthday Cake Candles", "Java", "Accepted"),
    ("Mini-Max Sum", "C++", "Accepted"),
    ("Time Conversion", "JavaScript", "Wrong Answer"),
    ("Grading Students", "Python", "Accepted"),
    ("Apple and Orange", "Java", "Accepted"),
    ("Kangaroo", "C++", "Time Limit Exceeded"),
    ("Between Two Sets", "Python", "Accepted"),
];

fn seed_of(username: &str) -> u64 {
    username.chars().map(|c| c as u64).sum()
}

/// Single LCG step over the seed, scaled into `lo..=hi`. Deliberately does
/// not advance: the same seed and range always give the same value.
fn pick(seed: u64, lo: i64, hi: i64) -> i64 {
    let frac = (seed.wrapping_mul(9301).wrapping_add(49297) % 233_280) as f64 / 233_280.0;
    (frac * (hi - lo + 1) as f64).floor() as i64 + lo
}

pub fn stats_for(username: &str) -> HackerrankStats {
    synthesize(username, Utc::now())
}

/// Deterministic stats for a username; `now` anchors the relative dates.
pub fn synthesize(username: &str, now: DateTime<Utc>) -> HackerrankStats {
    let seed = seed_of(username);
    let r = |lo: i64, hi: i64| pick(seed, lo, hi);

    let badges: Vec<Badge> = BADGE_NAMES
        .iter()
        .take(r(3, 8) as usize)
        .map(|name| Badge { name: name.to_string(), stars: r(1, 5) })
        .collect();

    let mut skills: Vec<String> = badges.iter().map(|b| b.name.clone()).collect();
    for staple in ["Algorithms", "Data Structures", "Problem Solving"] {
        skills.push(staple.to_string());
    }
    skills.truncate(r(5, 10) as usize);

    let certificates: Vec<Certificate> = CERTIFICATE_NAMES
        .iter()
        .take(r(2, 5) as usize)
        .map(|name| Certificate {
            name: name.to_string(),
            date: (now - Duration::days(r(1, 365))).format("%Y-%m-%d").to_string(),
        })
        .collect();

    let contests: Vec<ContestResult> = CONTEST_NAMES
        .iter()
        .take(r(2, 5) as usize)
        .map(|name| ContestResult {
            name: name.to_string(),
            rank: r(100, 1000),
            score: r(50, 100) as f64 + r(0, 99) as f64 / 100.0,
        })
        .collect();

    let recent_submissions: Vec<Submission> = SUBMISSION_CATALOG
        .iter()
        .take(r(5, 8) as usize)
        .map(|(problem, language, status)| Submission {
            problem: problem.to_string(),
            date: now - Duration::days(r(1, 30)),
            language: language.to_string(),
            status: status.to_string(),
        })
        .collect();

    let easy = r(20, 80);
    let medium = r(15, 60);
    let hard = r(5, 30);
    let total_solved = easy + medium + hard;
    let total_attempted = total_solved + r(10, 50);

    let successful_submissions = total_solved.min(total_attempted);
    let total_submissions = (successful_submissions + r(20, 100)).max(total_attempted);

    let mut problem_solving = ProblemSolving {
        total: total_solved,
        algorithms: (total_solved as f64 * 0.6).floor() as i64 + r(0, 10),
        data_structures: (total_solved as f64 * 0.25).floor() as i64 + r(0, 8),
        mathematics: (total_solved as f64 * 0.15).floor() as i64 + r(0, 5),
    };
    // Category counts must never exceed the total; shave any excess evenly.
    let excess = problem_solving.algorithms + problem_solving.data_structures
        + problem_solving.mathematics
        - problem_solving.total;
    if excess > 0 {
        problem_solving.algorithms = (problem_solving.algorithms - (excess + 2) / 3).max(0);
        problem_solving.data_structures = (problem_solving.data_structures - excess / 3).max(0);
        problem_solving.mathematics = (problem_solving.mathematics - excess / 3).max(0);
    }

    let percentile = ((r(70, 99) as f64 + r(0, 99) as f64 / 100.0) * 100.0).round() / 100.0;

    HackerrankStats {
        username: username.to_string(),
        profile_url: format!("https://www.hackerrank.com/{username}"),
        rank: r(10_000, 100_000),
        percentile,
        badges,
        skills,
        certificates,
        contests,
        recent_submissions,
        problem_solving,
        total_submissions,
        successful_submissions,
        last_active: now - Duration::days(r(1, 14)),
        active_days: r((total_solved as f64 * 0.3) as i64, (total_solved as f64 * 0.8) as i64),
    }
}
