//! User-code and survey-code generation.
//!
//! User codes are 53-bit snowflake ids so they survive JavaScript number
//! handling unchanged. Survey codes are friendly `adjective-noun-number`
//! combinations drawn from a reserve (see `store`).

use anyhow::{bail, Result};
use chrono::Utc;
use rand::Rng;
use regex::Regex;
use std::sync::{Mutex, OnceLock};

/// 41 bits of millisecond timestamp
const TIMESTAMP_MASK: u64 = 0x1FF_FFFF_FFFF;
/// 2 bits of per-millisecond sequence
const SEQUENCE_MASK: u64 = 0x3;
/// 5 bits each for datacenter and worker
const NODE_MASK: u64 = 0x1F;

/// Generates 53-bit user codes.
///
/// Layout: `timestamp(41) | datacenter(5) | worker(5) | sequence(2)`.
/// The clock state lives behind a mutex so one generator can be shared
/// across request handlers.
pub struct CodeGenerator {
    datacenter_id: u64,
    worker_id: u64,
    state: Mutex<GeneratorState>,
}

struct GeneratorState {
    sequence: u64,
    last_timestamp: i64,
}

impl CodeGenerator {
    pub fn new(datacenter_id: u64, worker_id: u64) -> Self {
        Self {
            datacenter_id,
            worker_id,
            state: Mutex::new(GeneratorState {
                sequence: 0,
                last_timestamp: -1,
            }),
        }
    }

    /// Generate the next user code.
    ///
    /// Fails if the wall clock ran backwards since the previous call. When
    /// the 2-bit sequence wraps within one millisecond, generation spins to
    /// the next millisecond instead of reusing a slot.
    pub fn generate(&self) -> Result<i64> {
        let mut state = self.state.lock().unwrap();
        let mut timestamp = current_millis();

        if timestamp < state.last_timestamp {
            bail!("Clock moved backwards");
        }

        if timestamp == state.last_timestamp {
            state.sequence = (state.sequence + 1) & SEQUENCE_MASK;
            if state.sequence == 0 {
                timestamp = wait_next_millis(state.last_timestamp);
            }
        } else {
            state.sequence = 0;
        }

        state.last_timestamp = timestamp;

        let id = ((timestamp as u64 & TIMESTAMP_MASK) << 12)
            | ((self.datacenter_id & NODE_MASK) << 7)
            | ((self.worker_id & NODE_MASK) << 2)
            | (state.sequence & SEQUENCE_MASK);

        Ok(id as i64)
    }
}

fn current_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn wait_next_millis(last_timestamp: i64) -> i64 {
    let mut timestamp = current_millis();
    while timestamp <= last_timestamp {
        std::hint::spin_loop();
        timestamp = current_millis();
    }
    timestamp
}

// ==================== Friendly Survey Codes ====================

const ADJECTIVES: &[&str] = &[
    "happy", "brave", "calm", "kind", "wise", "clever", "bold", "eager",
];
const NOUNS: &[&str] = &[
    "fox", "owl", "bear", "wolf", "eagle", "lion", "tiger", "deer",
];

/// Generate one `adjective-noun-number` survey code candidate.
pub fn combo_id() -> String {
    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES[rng.gen_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.gen_range(0..NOUNS.len())];
    format!("{}-{}-{}", adjective, noun, rng.gen_range(1..=999))
}

static WELL_FORMED: OnceLock<Regex> = OnceLock::new();

/// Whether a survey code is acceptable: lowercase alphanumeric words joined
/// by single hyphens, nothing else.
pub fn is_well_formed(id: &str) -> bool {
    let pattern = WELL_FORMED.get_or_init(|| {
        Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("Pattern should always compile")
    });
    pattern.is_match(id)
}
