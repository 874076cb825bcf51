pub mod operands;

use rand::Rng;
use rand::rngs::SmallRng;

use crate::session::problem::{Operation, Problem};
use crate::settings::Settings;

/// Picks uniformly among the enabled operations, falling back to addition
/// when none are enabled.
///
/// `previous` is accepted so callers can pass the last operation drawn, but
/// it does not bias the choice: repeats are allowed.
pub fn choose_operation(
    settings: &Settings,
    _previous: Option<Operation>,
    rng: &mut SmallRng,
) -> Operation {
    let mut operations = settings.operations.enabled();
    if operations.is_empty() {
        operations.push(Operation::Addition);
    }
    operations[rng.gen_range(0..operations.len())]
}

pub fn generate_problem(
    settings: &Settings,
    previous: Option<Operation>,
    rng: &mut SmallRng,
) -> Problem {
    let operation = choose_operation(settings, previous, rng);
    let grade = settings.grade_level;
    let (first, second) = match operation {
        Operation::Addition => operands::addition_pair(grade, rng),
        Operation::Subtraction => operands::subtraction_pair(grade, rng),
        Operation::Multiplication => operands::multiplication_pair(grade, rng),
        Operation::Division => operands::division_pair(grade, rng),
    };
    Problem::new(operation, first, second)
}

/// Generates `settings.problem_count` independent problems. Duplicates are
/// possible.
pub fn generate_problems(settings: &Settings, rng: &mut SmallRng) -> Vec<Problem> {
    let mut problems = Vec::with_capacity(settings.problem_count);
    let mut previous = None;
    for _ in 0..settings.problem_count {
        let problem = generate_problem(settings, previous, rng);
        previous = Some(problem.operation);
        problems.push(problem);
    }
    problems
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::settings::OperationSet;
    use rand::SeedableRng;

    fn settings_with(grade: u8, ops: OperationSet, count: usize) -> Settings {
        Settings {
            grade_level: grade,
            operations: ops,
            problem_count: count,
            time_per_problem_secs: 0,
        }
    }

    #[test]
    fn test_generate_problems_returns_requested_count() {
        let mut rng = SmallRng::seed_from_u64(1);
        for count in [1, 10, 50] {
            let settings = settings_with(4, OperationSet::all(), count);
            assert_eq!(generate_problems(&settings, &mut rng).len(), count);
        }
    }

    #[test]
    fn test_answers_match_operation() {
        let mut rng = SmallRng::seed_from_u64(99);
        for grade in 4..=8 {
            let settings = settings_with(grade, OperationSet::all(), 50);
            for p in generate_problems(&settings, &mut rng) {
                let exact = p.operation.apply(p.first_operand, p.second_operand);
                assert_eq!(p.correct_answer, exact.round() as i64, "{}", p.solved());
                assert!(p.answer.is_none());
            }
        }
    }

    #[test]
    fn test_generated_operands_stay_in_grade_bands() {
        let mut rng = SmallRng::seed_from_u64(21);
        for grade in 4..=8 {
            let add = operands::addition_range(grade);
            let (band_one, band_two) = operands::multiplication_ranges(grade);
            for op in Operation::ALL {
                let settings = settings_with(grade, OperationSet::only(op), 50);
                for p in generate_problems(&settings, &mut rng) {
                    assert_eq!(p.operation, op);
                    let (a, b) = (p.first_operand, p.second_operand);
                    match op {
                        Operation::Addition | Operation::Subtraction => {
                            assert!(add.contains(&a) && add.contains(&b), "{}", p.prompt());
                        }
                        Operation::Multiplication => {
                            assert!(band_one.contains(&a), "{}", p.prompt());
                            assert!(band_two.contains(&b), "{}", p.prompt());
                        }
                        Operation::Division => {
                            assert_eq!(a % b, 0, "{}", p.prompt());
                            assert!(band_one.contains(&b), "{}", p.prompt());
                            assert!(band_two.contains(&(a / b)), "{}", p.prompt());
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_only_enabled_operations_are_used() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut ops = OperationSet::default();
        ops.set(Operation::Subtraction, true);
        ops.set(Operation::Division, true);
        let settings = settings_with(6, ops, 50);
        let used: HashSet<Operation> = generate_problems(&settings, &mut rng)
            .iter()
            .map(|p| p.operation)
            .collect();
        assert!(used.iter().all(|op| ops.contains(*op)));
    }

    #[test]
    fn test_no_operations_falls_back_to_addition() {
        let mut rng = SmallRng::seed_from_u64(5);
        let settings = settings_with(4, OperationSet::default(), 20);
        for p in generate_problems(&settings, &mut rng) {
            assert_eq!(p.operation, Operation::Addition);
            assert!((1..=100).contains(&p.first_operand));
        }
    }

    #[test]
    fn test_previous_operation_does_not_prevent_repeats() {
        let mut rng = SmallRng::seed_from_u64(11);
        let settings = settings_with(5, OperationSet::only(Operation::Multiplication), 5);
        let p = generate_problem(&settings, Some(Operation::Multiplication), &mut rng);
        assert_eq!(p.operation, Operation::Multiplication);
    }

    #[test]
    fn test_same_seed_same_problems() {
        let settings = settings_with(7, OperationSet::all(), 10);
        let a = generate_problems(&settings, &mut SmallRng::seed_from_u64(8));
        let b = generate_problems(&settings, &mut SmallRng::seed_from_u64(8));
        assert_eq!(a, b);
    }
}
