//! Single in-flight drag gesture: `Idle -> Dragging -> Idle`.
//!
//! While dragging, the held card follows whichever column the pointer is
//! over. That placement is visual only; the status change is committed by
//! the board when the gesture ends.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragGesture {
    pub task_id: String,
    pub hover: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragGesture),
}

impl DragState {
    /// Picks up `task_id` from `column`. A gesture already in flight is replaced.
    pub fn start(&mut self, task_id: &str, column: usize) {
        *self = DragState::Dragging(DragGesture {
            task_id: task_id.to_string(),
            hover: column,
        });
    }

    /// Tracks the column under the pointer. `None` means the pointer is
    /// outside every column, which leaves the card where it was last placed.
    pub fn over(&mut self, column: Option<usize>) {
        if let (DragState::Dragging(gesture), Some(column)) = (self, column) {
            gesture.hover = column;
        }
    }

    pub fn end(&mut self) -> Option<DragGesture> {
        match std::mem::take(self) {
            DragState::Dragging(gesture) => Some(gesture),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }

    pub fn gesture(&self) -> Option<&DragGesture> {
        match self {
            DragState::Dragging(gesture) => Some(gesture),
            DragState::Idle => None,
        }
    }

    /// Column the card is currently drawn in, if it is the one being held.
    pub fn placement(&self, task_id: &str) -> Option<usize> {
        self.gesture()
            .filter(|g| g.task_id == task_id)
            .map(|g| g.hover)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_end_is_noop() {
        let mut drag = DragState::default();
        drag.over(Some(2));
        assert_eq!(drag.end(), None);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn hover_follows_pointer() {
        let mut drag = DragState::default();
        drag.start("card", 0);
        drag.over(Some(2));
        drag.over(Some(1));
        assert_eq!(drag.placement("card"), Some(1));
        assert_eq!(drag.placement("other"), None);
    }

    #[test]
    fn leaving_all_columns_keeps_last_placement() {
        let mut drag = DragState::default();
        drag.start("card", 0);
        drag.over(Some(2));
        drag.over(None);
        let gesture = drag.end().unwrap();
        assert_eq!(gesture.hover, 2);
        assert_eq!(drag, DragState::Idle);
    }

    #[test]
    fn any_column_reachable_in_one_step() {
        let mut drag = DragState::default();
        drag.start("card", 2);
        drag.over(Some(0));
        assert_eq!(drag.end().map(|g| g.hover), Some(0));
    }
}
