use crate::api::{ApiClient, ApiError, EhttpTransport, Submission};
use crate::collection::Collection;
use crate::config::ClientConfig;
use crate::course_form::CourseForm;
use crate::enrollment_list::{EnrollmentAction, EnrollmentList};
use crate::invalidation::{self, CollectionKind, Entity, Mutation};
use crate::professor_form::ProfessorForm;
use crate::route::Route;
use crate::student_form::StudentForm;
use crate::views::{self, EnrollmentEvent, EntityView, Metrics, ViewAction};
use crate::{course_list, professor_list, student_list};
use common::packets::c2s::UpdateEstado;
use common::{
    Alumno, Curso, CursoId, EstadoInscripcion, Inscripcion, InscripcionId, Legajo, Profesor,
};
use eframe::App;
use log::{debug, error, info, warn};
use serde::de::IgnoredAny;
use std::sync::mpsc;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

enum Incoming {
    Profesores(Result<Vec<Profesor>, ApiError>),
    Alumnos(Result<Vec<Alumno>, ApiError>),
    Cursos(Result<Vec<Curso>, ApiError>),
    Inscripciones(Result<Vec<Inscripcion>, ApiError>),
    CourseFormProfessors {
        key: u64,
        result: Result<Vec<Profesor>, ApiError>,
    },
    EnrollmentFormStudents {
        key: u64,
        result: Result<Vec<Alumno>, ApiError>,
    },
    EnrollmentFormCourses {
        key: u64,
        result: Result<Vec<Curso>, ApiError>,
    },
    ProfessorSaved(Result<Profesor, ApiError>),
    StudentSaved(Result<Alumno, ApiError>),
    CourseSaved(Result<Curso, ApiError>),
    Enrolled(Result<(), ApiError>),
    GradeRegistered {
        id: InscripcionId,
        result: Result<(), ApiError>,
    },
    StatusChanged {
        id: InscripcionId,
        estado: EstadoInscripcion,
        result: Result<(), ApiError>,
    },
    Deleted {
        target: DeleteTarget,
        result: Result<(), ApiError>,
    },
}

/// A row waiting for the user to confirm its deletion
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteTarget {
    pub entity: Entity,
    pub path: String,
    pub prompt: String,
}

impl DeleteTarget {
    pub fn professor(legajo: Legajo) -> Self {
        Self {
            entity: Entity::Professor,
            path: format!("/profesores/{legajo}"),
            prompt: format!("¿Estás seguro de eliminar al profesor con legajo {legajo}?"),
        }
    }

    pub fn student(legajo: Legajo) -> Self {
        Self {
            entity: Entity::Student,
            path: format!("/alumnos/{legajo}"),
            prompt: format!("¿Estás seguro de eliminar al alumno con legajo {legajo}?"),
        }
    }

    pub fn course(id: CursoId) -> Self {
        Self {
            entity: Entity::Course,
            path: format!("/cursos/{id}"),
            prompt: format!("¿Estás seguro de eliminar el curso {id}?"),
        }
    }

    pub fn enrollment(id: InscripcionId) -> Self {
        Self {
            entity: Entity::Enrollment,
            path: format!("/inscripciones/{id}"),
            prompt: format!(
                "¿Estás seguro de eliminar la inscripción {id}? \
                 Esta acción es permanente y borrará las notas asociadas."
            ),
        }
    }
}

pub struct HttpApp {
    incoming_message: Receiver<Incoming>,
    sender: Sender<Incoming>,
    api: ApiClient,
    ctx: egui::Context,
    /// None when the start path matched no page
    route: Option<Route>,
    /// last location fragment the route was synced with
    location: String,

    profesores: Collection<Profesor>,
    alumnos: Collection<Alumno>,
    cursos: Collection<Curso>,
    inscripciones: Collection<Inscripcion>,

    professors: EntityView<ProfessorForm>,
    students: EntityView<StudentForm>,
    courses: EntityView<CourseForm>,
    enrollments: views::EnrollmentsView,
    enrollment_list: EnrollmentList,
    /// bumped whenever the enrollment form's selection lists may be stale
    remount_key: u64,
    course_form_key: u64,

    pending_delete: Option<DeleteTarget>,
    /// failure that no form can show, dismissed by the user
    notice: Option<String>,
}

impl HttpApp {
    const PROFESSORS_FAILED: &'static str = "No se pudieron cargar los profesores.";
    const STUDENTS_FAILED: &'static str = "No se pudieron cargar los alumnos.";
    const COURSES_FAILED: &'static str = "No se pudieron cargar los cursos.";
    const ENROLLMENTS_FAILED: &'static str = "No se pudieron cargar las inscripciones.";

    pub fn new(cc: &eframe::CreationContext, config: &ClientConfig) -> Self {
        let api = ApiClient::new(config.api_root.clone(), Arc::new(EhttpTransport));
        let route = config.start_route();
        if route.is_none() {
            warn!("No page at {}", config.start_path);
        }
        Self::with_client(cc.egui_ctx.clone(), api, route)
    }

    pub fn with_client(ctx: egui::Context, api: ApiClient, route: Option<Route>) -> Self {
        let (sender, incoming_message) = mpsc::channel();
        let mut this = Self {
            incoming_message,
            sender,
            api,
            ctx,
            route,
            location: String::new(),
            profesores: Collection::default(),
            alumnos: Collection::default(),
            cursos: Collection::default(),
            inscripciones: Collection::default(),
            professors: EntityView::new("Gestión de Profesores", "Profesor"),
            students: EntityView::new("Gestión de Alumnos", "Alumno"),
            courses: EntityView::new("Gestión de Cursos", "Curso"),
            enrollments: views::EnrollmentsView::default(),
            enrollment_list: EnrollmentList::default(),
            remount_key: 0,
            course_form_key: 0,
            pending_delete: None,
            notice: None,
        };
        this.fetch_all();
        this
    }

    /// Callback that channels an answer to the next frame and wakes the ui up
    fn deliver<T, W>(&self, wrap: W) -> impl FnOnce(T) + Send + 'static
    where
        T: 'static,
        W: FnOnce(T) -> Incoming + Send + 'static,
    {
        let sender = self.sender.clone();
        let ctx = self.ctx.clone();
        move |value| {
            if sender.send(wrap(value)).is_err() {
                warn!("Answer arrived after the app was closed");
                return;
            }
            ctx.request_repaint();
        }
    }

    fn fetch_all(&mut self) {
        self.refetch(CollectionKind::Professors);
        self.refetch(CollectionKind::Students);
        self.refetch(CollectionKind::Courses);
        self.refetch(CollectionKind::Enrollments);
    }

    fn refetch(&mut self, kind: CollectionKind) {
        match kind {
            CollectionKind::Professors => {
                self.profesores.begin_fetch();
                let on_done = self.deliver(Incoming::Profesores);
                self.api.get::<Vec<Profesor>, _>("/profesores", on_done);
            }
            CollectionKind::Students => {
                self.alumnos.begin_fetch();
                let on_done = self.deliver(Incoming::Alumnos);
                self.api.get::<Vec<Alumno>, _>("/alumnos", on_done);
            }
            CollectionKind::Courses => {
                self.cursos.begin_fetch();
                let on_done = self.deliver(Incoming::Cursos);
                self.api.get::<Vec<Curso>, _>("/cursos", on_done);
            }
            CollectionKind::Enrollments => {
                self.inscripciones.begin_fetch();
                let on_done = self.deliver(Incoming::Inscripciones);
                self.api.get::<Vec<Inscripcion>, _>("/inscripciones", on_done);
            }
        }
    }

    /// Each opening of the course form gets its own key, older answers are dropped
    pub fn load_course_form_professors(&mut self) {
        self.course_form_key += 1;
        let key = self.course_form_key;
        let on_done = self.deliver(move |result: Result<Vec<Profesor>, ApiError>| {
            Incoming::CourseFormProfessors { key, result }
        });
        self.api.get::<Vec<Profesor>, _>("/profesores", on_done);
    }

    fn load_enrollment_form_options(&mut self) {
        let key = self.remount_key;
        let on_done = self.deliver(move |result: Result<Vec<Alumno>, ApiError>| {
            Incoming::EnrollmentFormStudents { key, result }
        });
        self.api.get::<Vec<Alumno>, _>("/alumnos", on_done);
        let on_done = self.deliver(move |result: Result<Vec<Curso>, ApiError>| {
            Incoming::EnrollmentFormCourses { key, result }
        });
        self.api.get::<Vec<Curso>, _>("/cursos", on_done);
    }

    /// Refetches whatever the mutation made stale
    fn apply(&mut self, entity: Entity, mutation: Mutation) {
        let plan = invalidation::plan(entity, mutation);
        info!("{entity:?} {mutation}, refreshing {:?}", plan.refetch);
        for kind in plan.refetch {
            self.refetch(*kind);
        }
        if plan.remount_enrollment_form {
            self.remount_key += 1;
            if self.enrollments.remount(self.remount_key) {
                self.load_enrollment_form_options();
            }
        }
    }

    pub fn open_enrollment_form(&mut self) {
        self.enrollments.open(self.remount_key);
        self.load_enrollment_form_options();
    }

    pub fn save_professor(&mut self, submission: &Submission) {
        let on_done = self.deliver(Incoming::ProfessorSaved);
        self.api.submit::<Profesor, _>(submission, on_done);
    }

    pub fn save_student(&mut self, submission: &Submission) {
        let on_done = self.deliver(Incoming::StudentSaved);
        self.api.submit::<Alumno, _>(submission, on_done);
    }

    pub fn save_course(&mut self, submission: &Submission) {
        let on_done = self.deliver(Incoming::CourseSaved);
        self.api.submit::<Curso, _>(submission, on_done);
    }

    /// the created enrollment may come back without its relations, its body is not read
    pub fn enroll(&mut self, submission: &Submission) {
        let on_done = self.deliver(|result: Result<IgnoredAny, ApiError>| {
            Incoming::Enrolled(result.map(|_| ()))
        });
        self.api.submit::<IgnoredAny, _>(submission, on_done);
    }

    pub fn register_grade(&mut self, id: InscripcionId, submission: &Submission) {
        let on_done = self.deliver(move |result: Result<IgnoredAny, ApiError>| {
            Incoming::GradeRegistered {
                id,
                result: result.map(|_| ()),
            }
        });
        self.api.submit::<IgnoredAny, _>(submission, on_done);
    }

    pub fn change_status(&mut self, id: InscripcionId, estado: EstadoInscripcion) {
        debug!("Enrollment {id} -> {estado}");
        let on_done = self.deliver(move |result: Result<(), ApiError>| Incoming::StatusChanged {
            id,
            estado,
            result,
        });
        self.api
            .patch(&format!("/inscripciones/{id}"), &UpdateEstado { estado }, on_done);
    }

    pub fn request_delete(&mut self, target: DeleteTarget) {
        self.pending_delete = Some(target);
    }

    pub fn cancel_delete(&mut self) {
        if let Some(target) = self.pending_delete.take() {
            debug!("Deletion of {} cancelled", target.path);
        }
    }

    pub fn confirm_delete(&mut self) {
        let Some(target) = self.pending_delete.take() else {
            return;
        };
        let path = target.path.clone();
        let on_done =
            self.deliver(move |result: Result<(), ApiError>| Incoming::Deleted { target, result });
        self.api.delete(&path, on_done);
    }

    pub fn check_incoming(&mut self) {
        let messages: Vec<Incoming> = self.incoming_message.try_iter().collect();
        for message in messages {
            self.handle(message);
        }
    }

    fn handle(&mut self, message: Incoming) {
        match message {
            Incoming::Profesores(result) => self.profesores.finish(result, Self::PROFESSORS_FAILED),
            Incoming::Alumnos(result) => self.alumnos.finish(result, Self::STUDENTS_FAILED),
            Incoming::Cursos(result) => self.cursos.finish(result, Self::COURSES_FAILED),
            Incoming::Inscripciones(result) => {
                self.inscripciones.finish(result, Self::ENROLLMENTS_FAILED)
            }
            Incoming::CourseFormProfessors { key, result } => {
                if key == self.course_form_key {
                    self.courses.form_mut().set_professors(result)
                } else {
                    debug!("Dropping professors requested by course form #{key}");
                }
            }
            Incoming::EnrollmentFormStudents { key, result } => {
                self.enrollments.form_mut().set_students(key, result)
            }
            Incoming::EnrollmentFormCourses { key, result } => {
                self.enrollments.form_mut().set_courses(key, result)
            }
            Incoming::ProfessorSaved(result) => {
                if let Some(mutation) = self.professors.on_saved(result) {
                    self.apply(Entity::Professor, mutation);
                }
            }
            Incoming::StudentSaved(result) => {
                if let Some(mutation) = self.students.on_saved(result) {
                    self.apply(Entity::Student, mutation);
                }
            }
            Incoming::CourseSaved(result) => {
                if let Some(mutation) = self.courses.on_saved(result) {
                    self.apply(Entity::Course, mutation);
                }
            }
            Incoming::Enrolled(result) => {
                if self.enrollments.on_created(result) {
                    self.apply(Entity::Enrollment, Mutation::Created);
                }
            }
            Incoming::GradeRegistered { id, result } => {
                let now = self.ctx.input(|i| i.time);
                if self.enrollment_list.on_grade_registered(id, result, now) {
                    self.apply(Entity::Grade, Mutation::Created);
                }
            }
            Incoming::StatusChanged { id, estado, result } => match result {
                Ok(()) => self.apply(Entity::Enrollment, Mutation::Updated),
                Err(e) => {
                    error!("Failed to set enrollment {id} to {estado}: {e}");
                    self.notice = Some(format!(
                        "No se pudo cambiar el estado de la inscripción {id} a {estado}."
                    ));
                }
            },
            Incoming::Deleted { target, result } => match result {
                Ok(()) => self.apply(target.entity, Mutation::Deleted),
                Err(e) => {
                    error!("Failed to delete {}: {e}", target.path);
                    self.notice = Some(match e.status() {
                        Some(status) => format!("No se pudo eliminar ({status})."),
                        None => "No se pudo eliminar: error de conexión.".to_string(),
                    });
                }
            },
        }
    }

    pub fn route(&self) -> Option<Route> {
        self.route
    }

    pub fn navigate(&mut self, route: Route) {
        self.route = Some(route);
        self.location = route.hash();
        #[cfg(target_arch = "wasm32")]
        crate::route::write_hash(route);
    }

    /// Follows the address bar when it changed outside the tabs (back, forward, typed url)
    pub fn follow_location(&mut self, hash: &str) {
        if hash == self.location {
            return;
        }
        self.location = hash.to_string();
        self.route = Route::from_path(hash);
        if self.route.is_none() {
            warn!("No page at {hash}");
        }
    }

    pub fn profesores(&self) -> &Collection<Profesor> {
        &self.profesores
    }

    pub fn alumnos(&self) -> &Collection<Alumno> {
        &self.alumnos
    }

    pub fn cursos(&self) -> &Collection<Curso> {
        &self.cursos
    }

    pub fn inscripciones(&self) -> &Collection<Inscripcion> {
        &self.inscripciones
    }

    pub fn professors_view(&mut self) -> &mut EntityView<ProfessorForm> {
        &mut self.professors
    }

    pub fn students_view(&mut self) -> &mut EntityView<StudentForm> {
        &mut self.students
    }

    pub fn courses_view(&mut self) -> &mut EntityView<CourseForm> {
        &mut self.courses
    }

    pub fn enrollments_view(&mut self) -> &mut views::EnrollmentsView {
        &mut self.enrollments
    }

    pub fn enrollment_list(&mut self) -> &mut EnrollmentList {
        &mut self.enrollment_list
    }

    pub fn remount_key(&self) -> u64 {
        self.remount_key
    }

    pub fn pending_delete(&self) -> Option<&DeleteTarget> {
        self.pending_delete.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    fn on_enrollment_action(&mut self, action: EnrollmentAction) {
        match action {
            EnrollmentAction::None => {}
            EnrollmentAction::ChangeStatus { id, estado } => self.change_status(id, estado),
            EnrollmentAction::RegisterGrade { id, submission } => {
                self.register_grade(id, &submission)
            }
            EnrollmentAction::Delete(id) => self.request_delete(DeleteTarget::enrollment(id)),
        }
    }

    fn show_tabs(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.strong("Gestión Académica");
            ui.separator();
            for route in Route::ALL {
                if ui
                    .selectable_label(self.route == Some(route), route.tab_label())
                    .clicked()
                {
                    self.navigate(route);
                }
            }
        });
    }

    fn show_notice(&mut self, ui: &mut egui::Ui) {
        let Some(notice) = &self.notice else {
            return;
        };
        let mut dismissed = false;
        egui::Frame::none()
            .fill(ui.visuals().extreme_bg_color)
            .stroke(egui::Stroke::new(1.0, ui.visuals().error_fg_color))
            .inner_margin(egui::Margin::same(8.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(ui.visuals().error_fg_color, notice);
                    dismissed = ui.button("Cerrar").clicked();
                });
            });
        if dismissed {
            self.notice = None;
        }
        ui.add_space(8.0);
    }

    fn show_confirm(&mut self, ctx: &egui::Context) {
        let Some(target) = &self.pending_delete else {
            return;
        };
        let mut answer = None;
        egui::Window::new("Confirmar eliminación")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(&target.prompt);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancelar").clicked() {
                        answer = Some(false);
                    }
                    if ui.button("Eliminar").clicked() {
                        answer = Some(true);
                    }
                });
            });
        match answer {
            Some(true) => self.confirm_delete(),
            Some(false) => self.cancel_delete(),
            None => {}
        }
    }

    fn show_page(&mut self, ui: &mut egui::Ui) {
        let Some(route) = self.route else {
            ui.vertical_centered(|ui| {
                ui.add_space(48.0);
                ui.heading("404 | Página no encontrada");
            });
            return;
        };

        match route {
            Route::Dashboard => {
                let metrics = Metrics::compute(
                    &self.profesores,
                    &self.cursos,
                    &self.alumnos,
                    &self.inscripciones,
                );
                let action = views::show_dashboard(
                    ui,
                    metrics,
                    &mut self.enrollment_list,
                    &self.inscripciones,
                );
                self.on_enrollment_action(action);
            }
            Route::Enrollments => {
                let event = self.enrollments.show(
                    ui,
                    self.remount_key,
                    &mut self.enrollment_list,
                    &self.inscripciones,
                );
                match event {
                    EnrollmentEvent::None => {}
                    EnrollmentEvent::FormOpened => self.load_enrollment_form_options(),
                    EnrollmentEvent::Enroll(submission) => self.enroll(&submission),
                    EnrollmentEvent::List(action) => self.on_enrollment_action(action),
                }
            }
            Route::Professors => {
                let profesores = &self.profesores;
                match self
                    .professors
                    .show(ui, |ui| professor_list::show(ui, profesores))
                {
                    ViewAction::Save(submission) => self.save_professor(&submission),
                    ViewAction::Delete(legajo) => {
                        self.request_delete(DeleteTarget::professor(legajo))
                    }
                    ViewAction::FormOpened | ViewAction::None => {}
                }
            }
            Route::Students => {
                let alumnos = &self.alumnos;
                match self.students.show(ui, |ui| student_list::show(ui, alumnos)) {
                    ViewAction::Save(submission) => self.save_student(&submission),
                    ViewAction::Delete(legajo) => self.request_delete(DeleteTarget::student(legajo)),
                    ViewAction::FormOpened | ViewAction::None => {}
                }
            }
            Route::Courses => {
                let cursos = &self.cursos;
                match self.courses.show(ui, |ui| course_list::show(ui, cursos)) {
                    ViewAction::Save(submission) => self.save_course(&submission),
                    ViewAction::Delete(id) => self.request_delete(DeleteTarget::course(id)),
                    ViewAction::FormOpened => self.load_course_form_professors(),
                    ViewAction::None => {}
                }
            }
        }
    }

    /// One frame of the whole interface
    pub fn ui(&mut self, ctx: &egui::Context) {
        self.check_incoming();

        #[cfg(target_arch = "wasm32")]
        {
            if let Some(hash) = crate::route::read_hash() {
                self.follow_location(&hash);
            }
            // hash changes do not wake egui up
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        let now = ctx.input(|i| i.time);
        if let Some(left) = self.enrollment_list.tick(now) {
            ctx.request_repaint_after(Duration::from_secs_f64(left));
        }

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| self.show_tabs(ui));
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_notice(ui);
            egui::ScrollArea::vertical().show(ui, |ui| self.show_page(ui));
        });
        self.show_confirm(ctx);
    }
}

impl App for HttpApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}
