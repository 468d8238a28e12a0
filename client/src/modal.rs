/// Open flag of a create/edit dialog and the entity being edited, if any
#[derive(Debug, Clone, PartialEq)]
pub struct ModalState<E> {
    open: bool,
    editing: Option<E>,
}

impl<E> Default for ModalState<E> {
    fn default() -> Self {
        Self {
            open: false,
            editing: None,
        }
    }
}

impl<E> ModalState<E> {
    pub fn open_create(&mut self) {
        self.open = true;
        self.editing = None;
    }

    pub fn open_edit(&mut self, entity: E) {
        self.open = true;
        self.editing = Some(entity);
    }

    pub fn close(&mut self) {
        self.open = false;
        self.editing = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn editing(&self) -> Option<&E> {
        self.editing.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_clears_edit_target_and_close_clears_everything() {
        let mut modal = ModalState::default();
        modal.open_edit("Ana");
        assert!(modal.is_open());
        assert_eq!(modal.editing(), Some(&"Ana"));

        modal.open_create();
        assert!(modal.is_open());
        assert_eq!(modal.editing(), None);

        modal.open_edit("Luis");
        modal.close();
        assert!(!modal.is_open());
        assert_eq!(modal.editing(), None);
    }
}
