use crate::api::{ApiError, Submission};
use crate::collection::{Collection, RowAction};
use crate::enrollment_form::EnrollmentForm;
use crate::enrollment_list::{EnrollmentAction, EnrollmentList};
use crate::form::{EntityForm, FormEvent};
use crate::invalidation::Mutation;
use crate::modal::ModalState;
use common::{Alumno, Curso, Inscripcion, Profesor};

/// What a page asks the app to do
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction<K> {
    None,
    /// the form was just (re)built, its option lists must be requested
    FormOpened,
    Save(Submission),
    Delete(K),
}

/// A table with a "new" button and the create/edit dialog of its entity
pub struct EntityView<F: EntityForm> {
    title: &'static str,
    noun: &'static str,
    modal: ModalState<F::Entity>,
    form: F,
}

impl<F: EntityForm> EntityView<F> {
    pub fn new(title: &'static str, noun: &'static str) -> Self {
        Self {
            title,
            noun,
            modal: ModalState::default(),
            form: F::create(),
        }
    }

    pub fn open_create(&mut self) {
        self.modal.open_create();
        self.form = F::create();
    }

    pub fn open_edit(&mut self, entity: F::Entity) {
        self.form = F::edit(&entity);
        self.modal.open_edit(entity);
    }

    pub fn close(&mut self) {
        self.modal.close();
    }

    pub fn modal(&self) -> &ModalState<F::Entity> {
        &self.modal
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    /// Closes the dialog when the save went through and tells which mutation happened
    pub fn on_saved(&mut self, result: Result<F::Entity, ApiError>) -> Option<Mutation> {
        let mutation = self.form.mutation();
        if self.form.on_response(result) {
            self.close();
            Some(mutation)
        } else {
            None
        }
    }

    pub fn show<K>(
        &mut self,
        ui: &mut egui::Ui,
        list: impl FnOnce(&mut egui::Ui) -> RowAction<F::Entity, K>,
    ) -> ViewAction<K> {
        let mut action = ViewAction::None;
        let create = ui
            .horizontal(|ui| {
                ui.heading(self.title);
                ui.button(format!("Nuevo {}", self.noun)).clicked()
            })
            .inner;
        if create {
            self.open_create();
            action = ViewAction::FormOpened;
        }
        ui.separator();

        match list(ui) {
            RowAction::Edit(entity) => {
                self.open_edit(entity);
                action = ViewAction::FormOpened;
            }
            RowAction::Delete(key) => action = ViewAction::Delete(key),
            RowAction::None => {}
        }

        if self.modal.is_open() {
            let verb = if self.modal.editing().is_some() {
                "Editar"
            } else {
                "Nuevo"
            };
            let mut open = true;
            let mut event = FormEvent::None;
            egui::Window::new(format!("{verb} {}", self.noun))
                .id(egui::Id::new(("entity_form", self.noun)))
                .open(&mut open)
                .collapsible(false)
                .show(ui.ctx(), |ui| event = self.form.update(ui));
            match event {
                FormEvent::Submit(submission) => action = ViewAction::Save(submission),
                FormEvent::Cancel => self.close(),
                FormEvent::None if !open => self.close(),
                FormEvent::None => {}
            }
        }
        action
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnrollmentEvent {
    None,
    FormOpened,
    Enroll(Submission),
    List(EnrollmentAction),
}

/// Enrollment page: the student/course picker and the enrollment table
pub struct EnrollmentsView {
    open: bool,
    form: EnrollmentForm,
}

impl Default for EnrollmentsView {
    fn default() -> Self {
        Self {
            open: false,
            form: EnrollmentForm::new(0),
        }
    }
}

impl EnrollmentsView {
    pub fn open(&mut self, key: u64) {
        self.open = true;
        self.form = EnrollmentForm::new(key);
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Rebuilds the form for a new key; true when it is on screen and needs its lists again
    pub fn remount(&mut self, key: u64) -> bool {
        self.form = EnrollmentForm::new(key);
        self.open
    }

    pub fn form(&self) -> &EnrollmentForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EnrollmentForm {
        &mut self.form
    }

    pub fn on_created(&mut self, result: Result<(), ApiError>) -> bool {
        let created = self.form.on_response(result);
        if created {
            self.close();
        }
        created
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        key: u64,
        list: &mut EnrollmentList,
        inscripciones: &Collection<Inscripcion>,
    ) -> EnrollmentEvent {
        let mut event = EnrollmentEvent::None;
        ui.horizontal(|ui| {
            ui.heading("Gestión de Inscripciones");
            if ui.button("Nueva Inscripción").clicked() {
                event = EnrollmentEvent::FormOpened;
            }
        });
        if event == EnrollmentEvent::FormOpened {
            self.open(key);
        }
        ui.separator();

        match list.show(ui, inscripciones) {
            EnrollmentAction::None => {}
            other => event = EnrollmentEvent::List(other),
        }

        if self.open {
            let mut open = true;
            let mut form_event = FormEvent::None;
            egui::Window::new("Nueva Inscripción")
                .open(&mut open)
                .collapsible(false)
                .show(ui.ctx(), |ui| form_event = self.form.update(ui));
            match form_event {
                FormEvent::Submit(submission) => event = EnrollmentEvent::Enroll(submission),
                FormEvent::Cancel => self.close(),
                FormEvent::None if !open => self.close(),
                FormEvent::None => {}
            }
        }
        event
    }
}

/// Figures shown on the dashboard cards
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Metrics {
    pub professors: usize,
    pub courses: usize,
    pub students: usize,
    pub enrollments: usize,
}

impl Metrics {
    pub fn compute(
        profesores: &Collection<Profesor>,
        cursos: &Collection<Curso>,
        alumnos: &Collection<Alumno>,
        inscripciones: &Collection<Inscripcion>,
    ) -> Self {
        Self {
            professors: profesores.len(),
            courses: cursos.len(),
            students: alumnos.len(),
            enrollments: inscripciones.len(),
        }
    }

    fn cards(&self) -> [(&'static str, usize); 4] {
        [
            ("Profesores registrados", self.professors),
            ("Cursos activos", self.courses),
            ("Alumnos registrados", self.students),
            ("Total Inscripciones", self.enrollments),
        ]
    }
}

pub fn show_dashboard(
    ui: &mut egui::Ui,
    metrics: Metrics,
    list: &mut EnrollmentList,
    inscripciones: &Collection<Inscripcion>,
) -> EnrollmentAction {
    ui.heading("Panel de Control");
    ui.add_space(8.0);
    ui.horizontal_wrapped(|ui| {
        for (label, value) in metrics.cards() {
            egui::Frame::group(ui.style())
                .inner_margin(egui::Margin::same(12.0))
                .show(ui, |ui| {
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(value.to_string()).size(28.0).strong());
                        ui.label(label);
                    });
                });
        }
    });
    ui.add_space(12.0);
    ui.heading("Últimas Inscripciones");
    ui.separator();
    list.show(ui, inscripciones)
}
