use crate::domain::Step;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Current,
    Pending,
}

/// Status of every step relative to `current`, in wizard order.
pub fn progress(current: Step) -> Vec<(Step, StepStatus)> {
    Step::ALL
        .iter()
        .map(|step| {
            let status = if step.index() < current.index() {
                StepStatus::Completed
            } else if *step == current {
                StepStatus::Current
            } else {
                StepStatus::Pending
            };
            (*step, status)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_steps_around_the_current_one() {
        let states = progress(Step::Service);
        assert_eq!(states[0], (Step::Date, StepStatus::Completed));
        assert_eq!(states[1], (Step::Time, StepStatus::Completed));
        assert_eq!(states[2], (Step::Service, StepStatus::Current));
        assert_eq!(states[4], (Step::Summary, StepStatus::Pending));
    }
}
