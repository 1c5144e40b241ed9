//! Tasks: what the probe does once it arrives.

use serde::Serialize;

/// The work performed on each planet. One kind is chosen per mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskKind {
    SampleCollection,
    PhotographSurface,
    AnalyzeAtmosphere,
    RepairProbe,
}

/// The task chosen at mission start.
///
/// An out-of-range choice is not an error: the mission still flies and
/// records that no task was performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TaskSelection {
    Task { task: TaskKind },
    Invalid { choice: Option<i64> },
}

impl TaskKind {
    /// Every task, in menu order.
    pub const ALL: [TaskKind; 4] = [
        TaskKind::SampleCollection,
        TaskKind::PhotographSurface,
        TaskKind::AnalyzeAtmosphere,
        TaskKind::RepairProbe,
    ];

    /// Maps a 1-based menu choice to a task.
    pub fn from_choice(choice: i64) -> Option<Self> {
        match choice {
            1 => Some(Self::SampleCollection),
            2 => Some(Self::PhotographSurface),
            3 => Some(Self::AnalyzeAtmosphere),
            4 => Some(Self::RepairProbe),
            _ => None,
        }
    }

    /// The name written on the `Task:` line.
    pub fn title(self) -> &'static str {
        match self {
            Self::SampleCollection => "Sample Collection",
            Self::PhotographSurface => "Photograph Surface",
            Self::AnalyzeAtmosphere => "Analyze Atmosphere",
            Self::RepairProbe => "Repair Space Probe",
        }
    }
}

impl TaskSelection {
    /// Interprets a menu choice. `None` stands for input that was not a number.
    pub fn from_choice(choice: Option<i64>) -> Self {
        match choice.and_then(TaskKind::from_choice) {
            Some(task) => Self::Task { task },
            None => Self::Invalid { choice },
        }
    }

    pub fn task(self) -> Option<TaskKind> {
        match self {
            Self::Task { task } => Some(task),
            Self::Invalid { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choices_map_in_order() {
        for (i, task) in TaskKind::ALL.into_iter().enumerate() {
            let choice = i64::try_from(i).unwrap() + 1;
            assert_eq!(TaskKind::from_choice(choice), Some(task));
        }
    }

    #[test]
    fn out_of_range_choice_is_invalid_selection() {
        assert_eq!(
            TaskSelection::from_choice(Some(5)),
            TaskSelection::Invalid { choice: Some(5) }
        );
        assert_eq!(
            TaskSelection::from_choice(Some(0)),
            TaskSelection::Invalid { choice: Some(0) }
        );
        assert_eq!(
            TaskSelection::from_choice(None),
            TaskSelection::Invalid { choice: None }
        );
    }

    #[test]
    fn valid_choice_selects_task() {
        let selection = TaskSelection::from_choice(Some(3));
        assert_eq!(selection.task(), Some(TaskKind::AnalyzeAtmosphere));
    }

    #[test]
    fn titles() {
        assert_eq!(TaskKind::SampleCollection.title(), "Sample Collection");
        assert_eq!(TaskKind::RepairProbe.title(), "Repair Space Probe");
    }
}
