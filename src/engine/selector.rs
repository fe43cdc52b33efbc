//! Per-day exercise selection via genetic search
//!
//! Searches fixed-length, duplicate-free tuples of pool indices for the
//! selection with the best composite fitness: injury avoidance, focus
//! relevance, preference bonus, body-part and muscle variety, and cardio
//! load balance. The search is stochastic; callers wanting reproducible
//! output inject a seed through [`GaConfig`].

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::catalog::ExerciseRecord;
use crate::taxonomy::{focus_group_parts, is_focus_match, BodyPart, Focus};

const MAX_PENALTY: f64 = 10.0;

/// Running-style cardio counts as 4 selection slots
const CARDIO_RUN_NAMES: &[&str] = &["run", "run on treadmill"];

/// Indoor-machine cardio counts as 3 selection slots
const CARDIO_INDOOR_NAMES: &[&str] = &[
    "stationary bike run",
    "elliptical machine walk",
    "bicycle recline walk",
    "cycle cross trainer",
    "walking on incline treadmill",
    "walking on treadmill",
    "walking",
];

/// Movements favored on cardio days for users below the obesity threshold
const CARDIO_PRIORITY_KEYWORDS: &[&str] = &["run", "walk", "jog"];

/// Cooperative cancellation flag, checked between generations and between
/// day computations.
#[derive(Debug, Default)]
pub struct CancelFlag(AtomicBool);

impl CancelFlag {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Genetic search parameters
#[derive(Debug, Clone)]
pub struct GaConfig {
    pub generations: usize,
    pub population: usize,
    /// Parents entering the mating pool each generation
    pub mating_pool: usize,
    /// Best genomes carried over unchanged
    pub elite: usize,
    pub tournament_size: usize,
    /// Per-gene mutation probability
    pub mutation_rate: f64,
    /// Stop after this many generations without improvement
    pub saturation_patience: usize,
    /// Deterministic seed; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            generations: 25,
            population: 20,
            mating_pool: 8,
            elite: 3,
            tournament_size: 3,
            mutation_rate: 0.12,
            saturation_patience: 5,
            seed: None,
        }
    }
}

fn is_priority_cardio(name: &str) -> bool {
    CARDIO_PRIORITY_KEYWORDS.iter().any(|k| name.contains(k))
}

/// Variety penalty over the selected body parts, relative to how many
/// distinct focus-group parts the pool actually offers.
fn body_part_variation_penalty(
    seen_parts: &[BodyPart],
    focus: Focus,
    pool: &[&ExerciseRecord],
) -> f64 {
    let unique: HashSet<BodyPart> = seen_parts.iter().copied().collect();
    let mut counts: HashMap<BodyPart, usize> = HashMap::new();
    for bp in seen_parts {
        *counts.entry(*bp).or_insert(0) += 1;
    }
    let most_common = counts.values().copied().max().unwrap_or(0);

    let available: HashSet<BodyPart> = pool.iter().map(|e| e.body_part).collect();
    let available_group_parts = focus_group_parts(focus)
        .into_iter()
        .filter(|bp| available.contains(bp))
        .count();

    let mut penalty = 0.0;
    if available_group_parts >= 3 {
        if unique.len() < 3 {
            penalty += MAX_PENALTY;
        }
        if most_common >= 4 {
            penalty += MAX_PENALTY;
        }
        match unique.len() {
            3 => penalty -= 2.0,
            4 => penalty -= 3.0,
            n if n >= 5 => penalty -= 5.0,
            _ => {}
        }
    } else if unique.len() < 2 {
        // Narrow pool: only ask for a minimum of spread
        penalty += MAX_PENALTY;
    }
    penalty
}

/// Penalty for low primary/secondary muscle diversity across the selection
fn muscle_variation_penalty(genes: &[usize], pool: &[&ExerciseRecord]) -> f64 {
    let mut primary: HashSet<&str> = HashSet::new();
    let mut secondary: HashSet<&str> = HashSet::new();
    for &idx in genes {
        let ex = pool[idx];
        primary.extend(ex.primary_muscles.iter().map(String::as_str));
        secondary.extend(ex.secondary_muscles.iter().map(String::as_str));
    }

    let mut penalty = 0.0;
    if primary.len() < 2 {
        penalty += 3.0 * (2 - primary.len()) as f64;
    }
    if secondary.len() < 2 {
        penalty += 1.0 * (2 - secondary.len()) as f64;
    }
    penalty
}

/// Composite fitness of one genome (higher is better)
fn evaluate(
    genes: &[usize],
    pool: &[&ExerciseRecord],
    focus: Focus,
    injured: &HashSet<BodyPart>,
    preferred: &HashSet<BodyPart>,
    bmi: f64,
    slot_target: usize,
) -> f64 {
    let mut score = 0.0;
    let mut seen_parts: Vec<BodyPart> = Vec::with_capacity(genes.len());
    let mut names: Vec<String> = Vec::with_capacity(genes.len());
    let mut run_count = 0usize;
    let mut indoor_count = 0usize;
    let mut cardio_slots = 0usize;

    for &idx in genes {
        let ex = pool[idx];
        let bp = ex.body_part;
        let name = ex.name.to_lowercase();

        if injured.contains(&bp) {
            score -= 5.0;
        }
        if is_focus_match(bp, focus) {
            score += 2.0;
        } else {
            score -= 3.0;
        }
        if preferred.contains(&bp) {
            score += 1.0;
        }
        if bp == BodyPart::Cardio && bmi < 30.0 && is_priority_cardio(&name) {
            score += 2.0;
        }

        if bp == BodyPart::Cardio {
            if CARDIO_RUN_NAMES.iter().any(|r| name.contains(r)) {
                run_count += 1;
                cardio_slots += 4;
            } else if CARDIO_INDOOR_NAMES.iter().any(|i| name.contains(i)) {
                indoor_count += 1;
                cardio_slots += 3;
            } else {
                cardio_slots += 1;
            }
        } else {
            cardio_slots += 1;
        }

        seen_parts.push(bp);
        names.push(name);
    }

    score -= body_part_variation_penalty(&seen_parts, focus, pool);
    score -= muscle_variation_penalty(genes, pool);

    let unique_names: HashSet<&str> = names.iter().map(String::as_str).collect();
    let duplicates = names.len() - unique_names.len();
    score -= 2.0 * duplicates as f64;

    if run_count > 1 || (run_count == 1 && genes.len() > 1) {
        score -= MAX_PENALTY;
    }
    if indoor_count > 1 || (indoor_count == 1 && genes.len() > 2) {
        score -= MAX_PENALTY;
    }
    if cardio_slots > slot_target {
        score -= 2.0 * (cardio_slots - slot_target) as f64;
    }

    score
}

fn random_genome(pool_len: usize, num_genes: usize, rng: &mut StdRng) -> Vec<usize> {
    rand::seq::index::sample(rng, pool_len, num_genes).into_vec()
}

/// Replace duplicate genes with unused pool indices
fn repair_duplicates(genes: &mut [usize], pool_len: usize, rng: &mut StdRng) {
    let mut seen = HashSet::new();
    let mut dup_positions = Vec::new();
    for (i, g) in genes.iter().enumerate() {
        if !seen.insert(*g) {
            dup_positions.push(i);
        }
    }
    if dup_positions.is_empty() {
        return;
    }

    let mut unused: Vec<usize> = (0..pool_len).filter(|i| !seen.contains(i)).collect();
    unused.shuffle(rng);
    for i in dup_positions {
        if let Some(replacement) = unused.pop() {
            genes[i] = replacement;
        }
    }
}

fn uniform_crossover(a: &[usize], b: &[usize], rng: &mut StdRng) -> Vec<usize> {
    a.iter()
        .zip(b.iter())
        .map(|(&ga, &gb)| if rng.gen_bool(0.5) { ga } else { gb })
        .collect()
}

fn mutate(genes: &mut [usize], pool_len: usize, rate: f64, rng: &mut StdRng) {
    for i in 0..genes.len() {
        if rng.gen::<f64>() < rate {
            let candidate = rng.gen_range(0..pool_len);
            if !genes.contains(&candidate) {
                genes[i] = candidate;
            }
        }
    }
}

/// Pick one parent by tournament among `size` random contenders
fn tournament_pick<'a>(
    scored: &'a [(Vec<usize>, f64)],
    size: usize,
    rng: &mut StdRng,
) -> &'a Vec<usize> {
    let mut best = &scored[rng.gen_range(0..scored.len())];
    for _ in 1..size.max(1) {
        let contender = &scored[rng.gen_range(0..scored.len())];
        if contender.1 > best.1 {
            best = contender;
        }
    }
    &best.0
}

/// Select exercises for one day.
///
/// Returns distinct indices into `pool`; length is the day target for the
/// focus (3 cardio, 4 single-body-part, 5 otherwise), clamped to the pool
/// size. An empty pool yields an empty selection. The best genome observed
/// across the whole run is returned, even when the search is cut short by
/// saturation or cancellation.
pub fn select(
    pool: &[&ExerciseRecord],
    focus: Focus,
    injured: &HashSet<BodyPart>,
    preferred: &HashSet<BodyPart>,
    bmi: f64,
    config: &GaConfig,
    cancel: &CancelFlag,
) -> Vec<usize> {
    if pool.is_empty() {
        return Vec::new();
    }

    let slot_target = focus.exercises_per_day();
    let num_genes = slot_target.min(pool.len());

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut population: Vec<Vec<usize>> = (0..config.population.max(2))
        .map(|_| random_genome(pool.len(), num_genes, &mut rng))
        .collect();

    let mut best_genes = population[0].clone();
    let mut best_fitness = f64::NEG_INFINITY;
    let mut stale_generations = 0usize;

    for generation in 0..config.generations.max(1) {
        if cancel.is_cancelled() {
            debug!(focus = %focus, generation, "selection cancelled");
            break;
        }

        let mut scored: Vec<(Vec<usize>, f64)> = population
            .drain(..)
            .map(|genes| {
                let mut fitness =
                    evaluate(&genes, pool, focus, injured, preferred, bmi, slot_target);
                if generation == 0 {
                    // Symmetry-breaking noise among equally scored starters
                    fitness -= rng.gen_range(2.0..5.0);
                }
                (genes, fitness)
            })
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        if scored[0].1 > best_fitness {
            best_fitness = scored[0].1;
            best_genes = scored[0].0.clone();
            stale_generations = 0;
        } else {
            stale_generations += 1;
            if stale_generations >= config.saturation_patience {
                debug!(focus = %focus, generation, best_fitness, "search saturated");
                break;
            }
        }

        let mating_pool: Vec<Vec<usize>> = (0..config.mating_pool.max(2))
            .map(|_| tournament_pick(&scored, config.tournament_size, &mut rng).clone())
            .collect();

        let mut next: Vec<Vec<usize>> = scored
            .iter()
            .take(config.elite)
            .map(|(genes, _)| genes.clone())
            .collect();
        while next.len() < config.population.max(2) {
            let a = &mating_pool[rng.gen_range(0..mating_pool.len())];
            let b = &mating_pool[rng.gen_range(0..mating_pool.len())];
            let mut child = uniform_crossover(a, b, &mut rng);
            mutate(&mut child, pool.len(), config.mutation_rate, &mut rng);
            repair_duplicates(&mut child, pool.len(), &mut rng);
            next.push(child);
        }
        population = next;
    }

    debug!(focus = %focus, best_fitness, picks = best_genes.len(), "day selection done");
    best_genes
}
