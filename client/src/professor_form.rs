use crate::api::{ApiError, Method, Submission};
use crate::form::{self, EntityForm, ErrorMessages, Feedback, FormEvent};
use common::packets::c2s::ProfesorDto;
use common::{Legajo, Profesor};
use log::error;

fn other_status(status: u16, status_text: &str) -> String {
    format!("Error: {status} {status_text}")
}

const MESSAGES: ErrorMessages = ErrorMessages {
    not_found: Some("Profesor no encontrado."),
    conflict: None,
    network: "Error de conexión: no se pudo guardar el profesor.",
    other: other_status,
};

pub struct ProfessorForm {
    draft: ProfesorDto,
    /// Some when editing
    target: Option<Legajo>,
    feedback: Feedback,
}

impl ProfessorForm {
    pub fn draft(&self) -> &ProfesorDto {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ProfesorDto {
        &mut self.draft
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }
}

impl EntityForm for ProfessorForm {
    type Entity = Profesor;

    fn create() -> Self {
        Self {
            draft: ProfesorDto::default(),
            target: None,
            feedback: Feedback::default(),
        }
    }

    fn edit(profesor: &Profesor) -> Self {
        Self {
            draft: ProfesorDto::from(profesor),
            target: Some(profesor.legajo_profesor),
            feedback: Feedback::default(),
        }
    }

    fn is_edit(&self) -> bool {
        self.target.is_some()
    }

    fn submit(&mut self) -> Option<Submission> {
        self.feedback.clear();
        let draft = &self.draft;
        let missing = form::missing(&[
            ("Nombre", draft.nombre.as_str()),
            ("Apellido", draft.apellido.as_str()),
            ("DNI", draft.dni.as_str()),
            ("Email", draft.email.as_str()),
            ("Fecha de Nacimiento", draft.fecha_nacimiento.as_str()),
        ]);
        if !missing.is_empty() {
            self.feedback.set_error(form::missing_message(&missing));
            return None;
        }

        let (method, path) = match self.target {
            None => (Method::Post, "/profesores".to_string()),
            Some(legajo) => (Method::Patch, format!("/profesores/{legajo}")),
        };
        match Submission::json(method, path, &self.draft) {
            Ok(submission) => Some(submission),
            Err(e) => {
                self.feedback.set_error(form::describe(&e, &MESSAGES));
                None
            }
        }
    }

    fn on_response(&mut self, result: Result<Profesor, ApiError>) -> bool {
        match result {
            Ok(profesor) => {
                let message = if self.is_edit() {
                    format!("Profesor \"{}\" actualizado.", profesor.nombre)
                } else {
                    format!(
                        "Profesor \"{}\" creado con legajo {}.",
                        profesor.nombre, profesor.legajo_profesor
                    )
                };
                self.feedback.set_success(message);
                self.draft = ProfesorDto::default();
                true
            }
            Err(e) => {
                error!("Failed to save professor: {e}");
                self.feedback.set_error(form::describe(&e, &MESSAGES));
                false
            }
        }
    }

    fn update(&mut self, ui: &mut egui::Ui) -> FormEvent {
        egui::Grid::new("professor_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                let draft = &mut self.draft;
                form::text_row(ui, "Nombre", &mut draft.nombre, "");
                form::text_row(ui, "Apellido", &mut draft.apellido, "");
                form::text_row(ui, "DNI", &mut draft.dni, "");
                form::text_row(ui, "Email", &mut draft.email, "nombre@dominio.com");
                form::text_row(ui, "Fecha de Nacimiento", &mut draft.fecha_nacimiento, "AAAA-MM-DD");
                form::text_row(ui, "Teléfono (Opcional)", &mut draft.telefono, "");
                form::text_row(ui, "Especialidades (Opcional)", &mut draft.especialidades, "");
            });

        ui.add_space(8.0);
        let (cancel, save) = form::buttons(ui, "Guardar Profesor", true);
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
