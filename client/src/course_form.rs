use crate::api::{ApiError, Method, Submission};
use crate::collection::Collection;
use crate::form::{self, EntityForm, ErrorMessages, Feedback, FormEvent};
use common::packets::c2s::CursoDto;
use common::{Curso, CursoId, Profesor};
use log::error;

fn other_status(_status: u16, _status_text: &str) -> String {
    "Error de servidor al crear el curso.".to_string()
}

const MESSAGES: ErrorMessages = ErrorMessages {
    not_found: Some("Profesor no encontrado o inactivo."),
    conflict: None,
    network: "Error de conexión.",
    other: other_status,
};

pub const PROFESSORS_UNAVAILABLE: &str =
    "Error cargando la lista de profesores. ¿El backend está corriendo?";
pub const PROFESSOR_REQUIRED: &str = "Debe seleccionar un profesor para el curso.";

pub struct CourseForm {
    draft: CursoDto,
    target: Option<CursoId>,
    feedback: Feedback,
    /// options of the professor selection box, loaded each time the form opens
    professors: Collection<Profesor>,
}

impl CourseForm {
    pub fn draft(&self) -> &CursoDto {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut CursoDto {
        &mut self.draft
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn professors(&self) -> &Collection<Profesor> {
        &self.professors
    }

    pub fn set_professors(&mut self, result: Result<Vec<Profesor>, ApiError>) {
        self.professors.finish(result, PROFESSORS_UNAVAILABLE);
    }

    fn professor_label(profesor: &Profesor) -> String {
        format!("Legajo {} - {}", profesor.legajo_profesor, profesor.full_name())
    }

    fn show_professor_select(&mut self, ui: &mut egui::Ui) {
        let selected = self.draft.profesor_legajo;
        let selected_text = self
            .professors
            .items()
            .iter()
            .find(|p| p.legajo_profesor == selected)
            .map(Self::professor_label)
            .unwrap_or_else(|| "Asignar Profesor".to_string());

        ui.label("Profesor");
        ui.add_enabled_ui(!self.professors.is_empty(), |ui| {
            egui::ComboBox::from_id_salt("course_professor")
                .selected_text(selected_text)
                .width(280.0)
                .show_ui(ui, |ui| {
                    for profesor in self.professors.items() {
                        ui.selectable_value(
                            &mut self.draft.profesor_legajo,
                            profesor.legajo_profesor,
                            Self::professor_label(profesor),
                        );
                    }
                });
        });
        ui.end_row();
    }
}

impl EntityForm for CourseForm {
    type Entity = Curso;

    fn create() -> Self {
        Self {
            draft: CursoDto::default(),
            target: None,
            feedback: Feedback::default(),
            professors: Collection::default(),
        }
    }

    fn edit(curso: &Curso) -> Self {
        Self {
            draft: CursoDto::from(curso),
            target: Some(curso.id),
            feedback: Feedback::default(),
            professors: Collection::default(),
        }
    }

    fn is_edit(&self) -> bool {
        self.target.is_some()
    }

    fn submit(&mut self) -> Option<Submission> {
        self.feedback.clear();
        let mut missing = form::missing(&[("Nombre del Curso", self.draft.nombre.as_str())]);
        if self.draft.duracion == 0 {
            missing.push("Duración (Horas)");
        }
        if !missing.is_empty() {
            self.feedback.set_error(form::missing_message(&missing));
            return None;
        }
        if !self.draft.profesor_legajo.is_selected() {
            self.feedback.set_error(PROFESSOR_REQUIRED);
            return None;
        }

        let (method, path) = match self.target {
            None => (Method::Post, "/cursos".to_string()),
            Some(id) => (Method::Patch, format!("/cursos/{id}")),
        };
        match Submission::json(method, path, &self.draft) {
            Ok(submission) => Some(submission),
            Err(e) => {
                self.feedback.set_error(form::describe(&e, &MESSAGES));
                None
            }
        }
    }

    fn on_response(&mut self, result: Result<Curso, ApiError>) -> bool {
        match result {
            Ok(curso) => {
                let message = if self.is_edit() {
                    format!("Curso \"{}\" actualizado.", curso.nombre)
                } else {
                    format!(
                        "Curso \"{}\" (ID: {}) creado y asignado.",
                        curso.nombre, curso.id
                    )
                };
                self.feedback.set_success(message);
                self.draft = CursoDto::default();
                true
            }
            Err(e) => {
                error!("Failed to save course: {e}");
                self.feedback.set_error(form::describe(&e, &MESSAGES));
                false
            }
        }
    }

    fn update(&mut self, ui: &mut egui::Ui) -> FormEvent {
        if self.professors.is_loading() {
            ui.add(egui::Spinner::new());
            return FormEvent::None;
        }

        egui::Grid::new("course_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                form::text_row(ui, "Nombre del Curso", &mut self.draft.nombre, "");
                ui.label("Descripción");
                ui.add(
                    egui::TextEdit::multiline(&mut self.draft.descripcion)
                        .desired_rows(2)
                        .desired_width(280.0),
                );
                ui.end_row();
                ui.label("Duración (Horas)");
                ui.add(egui::DragValue::new(&mut self.draft.duracion).range(0..=10_000));
                ui.end_row();
                self.show_professor_select(ui);
            });

        if let Some(error) = self.professors.error() {
            ui.colored_label(ui.visuals().error_fg_color, error);
        } else if self.professors.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, "No hay profesores activos.");
        }

        ui.add_space(8.0);
        let (cancel, save) = form::buttons(ui, "Guardar Curso", !self.professors.is_empty());
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

#[cfg(test)]
mod tests {
    use super::*;
    use common::Legajo;
    use serde_json::json;

    fn filled() -> CourseForm {
        let mut form = CourseForm::create();
        let draft = form.draft_mut();
        draft.nombre = "Algebra".to_string();
        draft.duracion = 40;
        form
    }

    #[test]
    fn professor_is_required() {
        let mut form = filled();
        assert_eq!(form.submit(), None);
        assert_eq!(form.feedback().error(), Some(PROFESSOR_REQUIRED));

        form.draft_mut().profesor_legajo = Legajo(2);
        let submission = form.submit().unwrap();
        assert_eq!(
            submission.body,
            json!({ "nombre": "Algebra", "duracion": 40, "profesorLegajo": 2 })
        );
    }

    #[test]
    fn zero_duration_counts_as_missing() {
        let mut form = filled();
        form.draft_mut().duracion = 0;
        form.draft_mut().profesor_legajo = Legajo(2);
        assert_eq!(form.submit(), None);
        assert_eq!(
            form.feedback().error(),
            Some("Complete los campos obligatorios: Duración (Horas).")
        );
    }

    #[test]
    fn professor_options_load_independently() {
        let mut form = CourseForm::create();
        assert!(form.professors().is_loading());
        form.set_professors(Err(ApiError::Network("refused".to_string())));
        assert!(!form.professors().is_loading());
        assert_eq!(form.professors().error(), Some(PROFESSORS_UNAVAILABLE));
    }

    #[test]
    fn unknown_professor_and_server_errors() {
        let mut form = filled();
        let not_found = ApiError::Status {
            status: 404,
            status_text: "Not Found".to_string(),
            messages: Some(vec!["Profesor 9 no existe".to_string()]),
        };
        assert!(!form.on_response(Err(not_found)));
        assert_eq!(
            form.feedback().error(),
            Some("Profesor no encontrado o inactivo.")
        );
        assert!(!form.on_response(Err(ApiError::Status {
            status: 503,
            status_text: "Service Unavailable".to_string(),
            messages: None,
        })));
        assert_eq!(
            form.feedback().error(),
            Some("Error de servidor al crear el curso.")
        );
    }

    #[test]
    fn edit_keeps_the_assigned_professor() {
        let curso: Curso = serde_json::from_value(json!({
            "id": 3,
            "nombre": "Algebra",
            "descripcion": "Lineal",
            "duracion": 40,
            "activo": true,
            "profesorLegajo": 2
        }))
        .unwrap();
        let mut form = CourseForm::edit(&curso);
        assert_eq!(form.draft().profesor_legajo, Legajo(2));
        let submission = form.submit().unwrap();
        assert_eq!(submission.method, Method::Patch);
        assert_eq!(submission.path, "/cursos/3");
        assert!(form.on_response(Ok(curso)));
        assert_eq!(form.feedback().success(), Some("Curso \"Algebra\" actualizado."));
    }
}
