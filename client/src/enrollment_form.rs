use crate::api::{ApiError, Method, Submission};
use crate::collection::Collection;
use crate::form::{self, ErrorMessages, Feedback, FormEvent};
use common::packets::c2s::CreateInscripcion;
use common::{Alumno, Curso};
use log::{debug, error};

fn other_status(status: u16, _status_text: &str) -> String {
    format!("Error de servidor al inscribir: {status}.")
}

const MESSAGES: ErrorMessages = ErrorMessages {
    not_found: Some("Error: Alumno o Curso no encontrado/inactivo."),
    conflict: Some("Conflicto: El alumno ya está inscrito en este curso."),
    network: "Error de conexión o de red.",
    other: other_status,
};

pub const OPTIONS_UNAVAILABLE: &str =
    "Error cargando listas para inscripción. Revise si hay Alumnos o Cursos activos.";
pub const SELECTION_REQUIRED: &str = "Debe seleccionar un alumno y un curso.";

/// Student and course picker. Rebuilt whenever the app bumps its remount key,
/// option answers carry the key they were requested with.
pub struct EnrollmentForm {
    key: u64,
    draft: CreateInscripcion,
    students: Collection<Alumno>,
    courses: Collection<Curso>,
    feedback: Feedback,
}

impl EnrollmentForm {
    pub fn new(key: u64) -> Self {
        Self {
            key,
            draft: CreateInscripcion::default(),
            students: Collection::default(),
            courses: Collection::default(),
            feedback: Feedback::default(),
        }
    }

    pub fn key(&self) -> u64 {
        self.key
    }

    pub fn draft(&self) -> &CreateInscripcion {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut CreateInscripcion {
        &mut self.draft
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn students(&self) -> &Collection<Alumno> {
        &self.students
    }

    pub fn courses(&self) -> &Collection<Curso> {
        &self.courses
    }

    pub fn set_students(&mut self, key: u64, result: Result<Vec<Alumno>, ApiError>) {
        if key != self.key {
            debug!("Dropping students requested by form #{key}, now #{}", self.key);
            return;
        }
        self.students.finish(result, OPTIONS_UNAVAILABLE);
    }

    pub fn set_courses(&mut self, key: u64, result: Result<Vec<Curso>, ApiError>) {
        if key != self.key {
            debug!("Dropping courses requested by form #{key}, now #{}", self.key);
            return;
        }
        self.courses.finish(result, OPTIONS_UNAVAILABLE);
    }

    pub fn submit(&mut self) -> Option<Submission> {
        self.feedback.clear();
        if !self.draft.alumno_legajo.is_selected() || !self.draft.curso_id.is_selected() {
            self.feedback.set_error(SELECTION_REQUIRED);
            return None;
        }
        match Submission::json(Method::Post, "/inscripciones", &self.draft) {
            Ok(submission) => Some(submission),
            Err(e) => {
                self.feedback.set_error(form::describe(&e, &MESSAGES));
                None
            }
        }
    }

    pub fn on_response(&mut self, result: Result<(), ApiError>) -> bool {
        match result {
            Ok(()) => {
                self.feedback.set_success("Alumno inscrito correctamente.");
                self.draft = CreateInscripcion::default();
                true
            }
            Err(e) => {
                error!("Enrollment failed: {e}");
                self.feedback.set_error(form::describe(&e, &MESSAGES));
                false
            }
        }
    }

    fn options_loading(&self) -> bool {
        self.students.is_loading() || self.courses.is_loading()
    }

    fn options_error(&self) -> Option<&str> {
        self.students.error().or(self.courses.error())
    }

    pub fn update(&mut self, ui: &mut egui::Ui) -> FormEvent {
        if self.options_loading() {
            ui.add(egui::Spinner::new());
            return FormEvent::None;
        }
        if let Some(error) = self.options_error() {
            ui.colored_label(ui.visuals().error_fg_color, error);
        }

        let student_text = self
            .students
            .items()
            .iter()
            .find(|a| a.legajo_alumno == self.draft.alumno_legajo)
            .map(|a| format!("{} ({})", a.full_name(), a.legajo_alumno))
            .unwrap_or_else(|| "Seleccione un alumno".to_string());
        let course_text = self
            .courses
            .items()
            .iter()
            .find(|c| c.id == self.draft.curso_id)
            .map(|c| format!("{} (ID: {})", c.nombre, c.id))
            .unwrap_or_else(|| "Seleccione un curso".to_string());

        egui::Grid::new("enrollment_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Alumno");
                egui::ComboBox::from_id_salt("enrollment_student")
                    .selected_text(student_text)
                    .width(280.0)
                    .show_ui(ui, |ui| {
                        for alumno in self.students.items() {
                            ui.selectable_value(
                                &mut self.draft.alumno_legajo,
                                alumno.legajo_alumno,
                                format!("{} ({})", alumno.full_name(), alumno.legajo_alumno),
                            );
                        }
                    });
                ui.end_row();

                ui.label("Curso");
                egui::ComboBox::from_id_salt("enrollment_course")
                    .selected_text(course_text)
                    .width(280.0)
                    .show_ui(ui, |ui| {
                        for curso in self.courses.items() {
                            ui.selectable_value(
                                &mut self.draft.curso_id,
                                curso.id,
                                format!("{} (ID: {})", curso.nombre, curso.id),
                            );
                        }
                    });
                ui.end_row();
            });

        ui.add_space(8.0);
        let can_save = !self.students.is_empty() && !self.courses.is_empty();
        let (cancel, save) = form::buttons(ui, "Inscribir Alumno", can_save);
        self.feedback.show(ui);

        if cancel {
            FormEvent::Cancel
        } else if save {
            self.submit().map(FormEvent::Submit).unwrap_or(FormEvent::None)
        } else {
            FormEvent::None
        }
    }
}
