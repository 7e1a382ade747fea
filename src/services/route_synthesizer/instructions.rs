//! Turn-instruction placement.
//!
//! The origin and destination carry fixed strings; milestone points at the
//! 25%/50%/75% index fractions each draw one instruction from the fixed
//! {action} x {direction} vocabulary. Every string the core can emit is
//! enumerable via [`instruction_vocabulary`].

use crate::constants::{
    ARRIVAL_INSTRUCTION, INSTRUCTION_ACTIONS, INSTRUCTION_DIRECTIONS,
    INSTRUCTION_MILESTONE_FRACTIONS, START_INSTRUCTION,
};
use crate::models::RoutePoint;
use rand::{rngs::StdRng, RngExt};

/// Attach instructions to a freshly shaped point list. Points other than
/// the origin, destination, and milestones carry none.
pub fn assign_instructions(points: &mut [RoutePoint], rng: &mut StdRng) {
    let n = points.len();
    if n < 2 {
        return;
    }

    points[0].instruction = Some(START_INSTRUCTION.to_string());
    points[n - 1].instruction = Some(ARRIVAL_INSTRUCTION.to_string());

    let mut previous: Option<String> = None;
    for fraction in INSTRUCTION_MILESTONE_FRACTIONS {
        let index = (fraction * n as f64).floor() as usize;
        // Milestones colliding with the endpoints or each other (tiny
        // routes) are skipped rather than overwritten.
        if index == 0 || index >= n - 1 || points[index].instruction.is_some() {
            continue;
        }
        let mut instruction = milestone_instruction(rng);
        if previous.as_deref() == Some(instruction.as_str()) {
            // Back-to-back identical guidance is useless; flip the direction
            instruction = flip_direction(&instruction);
        }
        points[index].instruction = Some(instruction.clone());
        previous = Some(instruction);
    }
}

fn flip_direction(instruction: &str) -> String {
    if let Some(action) = instruction.strip_suffix(INSTRUCTION_DIRECTIONS[0]) {
        format!("{}{}", action, INSTRUCTION_DIRECTIONS[1])
    } else if let Some(action) = instruction.strip_suffix(INSTRUCTION_DIRECTIONS[1]) {
        format!("{}{}", action, INSTRUCTION_DIRECTIONS[0])
    } else {
        instruction.to_string()
    }
}

/// One instruction drawn from the {action} x {direction} vocabulary.
pub fn milestone_instruction(rng: &mut StdRng) -> String {
    let action = INSTRUCTION_ACTIONS[rng.random_range(0..INSTRUCTION_ACTIONS.len())];
    let direction = INSTRUCTION_DIRECTIONS[rng.random_range(0..INSTRUCTION_DIRECTIONS.len())];
    format!("{} {}", action, direction)
}

/// Every instruction string the synthesizer can produce.
pub fn instruction_vocabulary() -> Vec<String> {
    let mut vocabulary = vec![
        START_INSTRUCTION.to_string(),
        ARRIVAL_INSTRUCTION.to_string(),
    ];
    for action in INSTRUCTION_ACTIONS {
        for direction in INSTRUCTION_DIRECTIONS {
            vocabulary.push(format!("{} {}", action, direction));
        }
    }
    vocabulary
}
