use std::rc::Rc;
use yew::Reducible;

use crate::model::MarkerId;

/// At most one origin marker is selected at a time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub active: Option<MarkerId>,
}

pub enum SelectionAction {
    /// Selecting the active marker again deselects it.
    Toggle(MarkerId),
    Clear,
}

impl SelectionState {
    pub fn select_marker(&mut self, id: MarkerId) {
        if self.active == Some(id) {
            self.active = None;
        } else {
            self.active = Some(id);
        }
    }

    pub fn clear(&mut self) {
        self.active = None;
    }

    pub fn is_active(&self, id: MarkerId) -> bool {
        self.active == Some(id)
    }
}

impl Reducible for SelectionState {
    type Action = SelectionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        match action {
            SelectionAction::Toggle(id) => new.select_marker(id),
            SelectionAction::Clear => {
                if new.active.is_none() {
                    return self;
                }
                new.clear();
            }
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: MarkerId = MarkerId("ethiopian-yirgacheffe");
    const B: MarkerId = MarkerId("kenyan-plateaus");

    #[test]
    fn selecting_twice_deselects() {
        let mut s = SelectionState::default();
        s.select_marker(A);
        assert_eq!(s.active, Some(A));
        s.select_marker(A);
        assert_eq!(s.active, None);
    }

    #[test]
    fn selecting_another_replaces() {
        let mut s = SelectionState::default();
        s.select_marker(A);
        s.select_marker(B);
        assert_eq!(s.active, Some(B));
        assert!(s.is_active(B));
        assert!(!s.is_active(A));
    }

    #[test]
    fn reducer_toggles_and_clears() {
        let s = Rc::new(SelectionState::default());
        let s = s.reduce(SelectionAction::Toggle(A));
        assert_eq!(s.active, Some(A));
        let s = s.reduce(SelectionAction::Clear);
        assert_eq!(s.active, None);
    }

    #[test]
    fn clearing_nothing_keeps_the_same_state() {
        let s = Rc::new(SelectionState::default());
        let next = s.clone().reduce(SelectionAction::Clear);
        assert!(Rc::ptr_eq(&s, &next));
    }
}
