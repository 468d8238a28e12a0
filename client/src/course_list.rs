use crate::collection::{self, Collection, RowAction};
use common::{Curso, CursoId};
use egui::Color32;

pub const EMPTY: &str = "No hay cursos para mostrar.";

fn activity(curso: &Curso) -> (&'static str, Color32) {
    if curso.activo {
        ("Activo", Color32::from_rgb(46, 125, 50))
    } else {
        ("Inactivo", Color32::GRAY)
    }
}

pub fn show(ui: &mut egui::Ui, cursos: &Collection<Curso>) -> RowAction<Curso, CursoId> {
    let Some(rows) = cursos.view().show_placeholder(ui, EMPTY) else {
        return RowAction::None;
    };

    let mut action = RowAction::None;
    egui::Grid::new("course_list")
        .striped(true)
        .num_columns(6)
        .show(ui, |ui| {
            collection::header(
                ui,
                &["ID", "Nombre", "Duración (Hrs)", "Profesor Asignado", "Estado", "Acciones"],
            );
            for curso in rows {
                ui.label(curso.id.to_string());
                ui.label(&curso.nombre);
                ui.label(curso.duracion.to_string());
                ui.label(curso.professor_label());
                let (text, fill) = activity(curso);
                collection::chip(ui, text, fill);
                ui.horizontal(|ui| {
                    if ui.button("Editar").clicked() {
                        action = RowAction::Edit(curso.clone());
                    }
                    if ui.button("Eliminar").clicked() {
                        action = RowAction::Delete(curso.id);
                    }
                });
                ui.end_row();
            }
        });
    action
}
