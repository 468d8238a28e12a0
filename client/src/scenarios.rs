//! Whole-app flows against a recording transport, without a window.

use crate::api::{ApiClient, HttpRequest, HttpResponse, Method};
use crate::app::{DeleteTarget, HttpApp};
use crate::form::EntityForm;
use crate::mock_transport::MockTransport;
use crate::route::Route;
use common::{CursoId, EstadoInscripcion, InscripcionId, Legajo};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

const ROOT: &str = "http://api";

fn path(request: &HttpRequest) -> &str {
    request.url.trim_start_matches(ROOT)
}

fn curso() -> Value {
    json!({
        "id": 3, "nombre": "Algebra", "descripcion": "Lineal", "duracion": 40, "activo": true,
        "profesor": {
            "legajoProfesor": 12, "nombre": "Ana", "apellido": "Gomez", "dni": "1",
            "email": "a@x.com", "fechaNacimiento": "2000-01-01", "activo": true
        },
        "profesorLegajo": 12
    })
}

fn alumno() -> Value {
    json!({
        "legajoAlumno": 7, "nombre": "Luis", "apellido": "Paz", "dni": "4",
        "email": "l@x.com", "fechaNacimiento": "2001-03-04", "activo": true
    })
}

fn inscripcion(id: u32, estado: &str, notas: Value) -> Value {
    json!({
        "id": id, "alumnoLegajo": 7, "cursoId": 3, "estado": estado,
        "alumno": alumno(), "curso": curso(), "notas": notas
    })
}

fn inscripciones() -> Value {
    json!([
        inscripcion(5, "ACTIVO", json!([
            { "id": 1, "nombreEvaluacion": "Parcial 1", "calificacion": "8.50",
              "fechaRegistro": "2024-05-01T10:30:00.000Z", "inscripcionId": 5 },
            { "id": 2, "nombreEvaluacion": "Parcial 2", "calificacion": "4.00",
              "fechaRegistro": "2024-06-01T10:30:00.000Z", "inscripcionId": 5 }
        ])),
        inscripcion(2, "COMPLETADO", json!(null)),
        inscripcion(9, "INSCRITO", json!([]))
    ])
}

/// Serves fixed collections and accepts every mutation
fn backend(request: &HttpRequest) -> Result<HttpResponse, String> {
    let response = match (request.method, path(request)) {
        (Method::Get, "/profesores") => {
            let profesor = curso()["profesor"].clone();
            MockTransport::json(200, json!([profesor]))
        }
        (Method::Get, "/alumnos") => MockTransport::json(200, json!([alumno()])),
        (Method::Get, "/cursos") => MockTransport::json(200, json!([curso()])),
        (Method::Get, "/inscripciones") => MockTransport::json(200, inscripciones()),
        (Method::Post, "/inscripciones") => {
            MockTransport::json(201, json!({ "id": 10, "estado": "INSCRITO" }))
        }
        (Method::Post, "/notas") => MockTransport::json(201, json!({ "id": 3 })),
        _ => MockTransport::text(200, ""),
    };
    Ok(response)
}

fn start(transport: Arc<MockTransport>, ctx: &egui::Context) -> HttpApp {
    let api = ApiClient::new(ROOT, transport);
    let mut app = HttpApp::with_client(ctx.clone(), api, Some(Route::Dashboard));
    app.check_incoming();
    app
}

#[test]
fn startup_fetches_the_four_collections_in_server_order() {
    let transport = MockTransport::new(backend);
    let app = start(transport.clone(), &egui::Context::default());

    for collection in ["/profesores", "/alumnos", "/cursos", "/inscripciones"] {
        assert_eq!(transport.count(Method::Get, collection), 1, "{collection}");
    }
    assert!(!app.inscripciones().is_loading());
    let ids: Vec<_> = app.inscripciones().items().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![InscripcionId(5), InscripcionId(2), InscripcionId(9)]);
    assert_eq!(app.inscripciones().items()[0].notas[0].calificacion, 8.5);
    assert!(app.inscripciones().items()[1].notas.is_empty());
}

#[test]
fn failed_fetch_shows_its_own_message() {
    let transport = MockTransport::new(|request| match path(request) {
        "/alumnos" => Err("connection refused".to_string()),
        _ => backend(request),
    });
    let app = start(transport, &egui::Context::default());
    assert_eq!(
        app.alumnos().error(),
        Some("No se pudieron cargar los alumnos.")
    );
    assert_eq!(app.cursos().error(), None);
    assert_eq!(app.cursos().len(), 1);
}

#[test]
fn created_professor_shows_up_after_the_refresh() {
    let stored = Arc::new(Mutex::new(Vec::<Value>::new()));
    let server = stored.clone();
    let transport = MockTransport::new(move |request| {
        let mut stored = server.lock().unwrap();
        match (request.method, path(request)) {
            (Method::Post, "/profesores") => {
                let mut profesor = MockTransport::body_of(request).unwrap();
                profesor["legajoProfesor"] = json!(12);
                profesor["activo"] = json!(true);
                stored.push(profesor.clone());
                Ok(MockTransport::json(201, profesor))
            }
            (Method::Get, "/profesores") => {
                Ok(MockTransport::json(200, Value::Array(stored.clone())))
            }
            _ => backend(request),
        }
    });
    let mut app = start(transport.clone(), &egui::Context::default());
    assert!(app.profesores().is_empty());

    app.professors_view().open_create();
    let form = app.professors_view().form_mut();
    let draft = form.draft_mut();
    draft.nombre = "Ana".to_string();
    draft.apellido = "Gomez".to_string();
    draft.dni = "1".to_string();
    draft.email = "a@x.com".to_string();
    draft.fecha_nacimiento = "2000-01-01".to_string();
    let expected_body = serde_json::to_value(form.draft()).unwrap();
    let submission = form.submit().unwrap();

    app.save_professor(&submission);
    app.check_incoming();
    app.check_incoming();

    let posts: Vec<_> = transport
        .requests()
        .into_iter()
        .filter(|r| r.method == Method::Post)
        .collect();
    assert_eq!(posts.len(), 1);
    assert_eq!(MockTransport::body_of(&posts[0]), Some(expected_body));

    let rows = app.profesores().items();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].legajo_profesor, Legajo(12));
    assert_eq!(rows[0].full_name(), "Ana Gomez");
    assert_eq!(rows[0].email, "a@x.com");

    assert!(!app.professors_view().modal().is_open());
    assert_eq!(
        app.professors_view().form().draft(),
        &common::packets::c2s::ProfesorDto::default()
    );
    // professors are not offered by the enrollment form
    assert_eq!(app.remount_key(), 0);
}

#[test]
fn unselected_student_sends_nothing() {
    let transport = MockTransport::new(backend);
    let mut app = start(transport.clone(), &egui::Context::default());
    app.open_enrollment_form();
    app.check_incoming();
    assert_eq!(app.enrollments_view().form().students().len(), 1);
    transport.clear();

    let form = app.enrollments_view().form_mut();
    form.draft_mut().curso_id = CursoId(3);
    assert_eq!(form.submit(), None);
    assert_eq!(
        form.feedback().error(),
        Some("Debe seleccionar un alumno y un curso.")
    );
    assert!(transport.requests().is_empty());
}

#[test]
fn duplicate_enrollment_keeps_the_draft() {
    let transport = MockTransport::new(|request| match (request.method, path(request)) {
        (Method::Post, "/inscripciones") => Ok(MockTransport::json(
            409,
            json!({ "message": "Ya inscrito", "statusCode": 409 }),
        )),
        _ => backend(request),
    });
    let mut app = start(transport.clone(), &egui::Context::default());
    app.open_enrollment_form();
    app.check_incoming();

    let form = app.enrollments_view().form_mut();
    form.draft_mut().alumno_legajo = Legajo(7);
    form.draft_mut().curso_id = CursoId(3);
    let submission = form.submit().unwrap();
    transport.clear();

    app.enroll(&submission);
    app.check_incoming();

    let view = app.enrollments_view();
    assert!(view.is_open());
    assert_eq!(
        view.form().feedback().error(),
        Some("Conflicto: El alumno ya está inscrito en este curso.")
    );
    assert_eq!(view.form().draft().alumno_legajo, Legajo(7));
    assert_eq!(view.form().draft().curso_id, CursoId(3));
    assert_eq!(transport.count(Method::Post, "/inscripciones"), 1);
    assert_eq!(transport.count(Method::Get, "/inscripciones"), 0);
}

#[test]
fn enrollment_refreshes_the_list_and_remounts_the_form() {
    let transport = MockTransport::new(backend);
    let mut app = start(transport.clone(), &egui::Context::default());
    app.open_enrollment_form();
    app.check_incoming();

    let form = app.enrollments_view().form_mut();
    form.draft_mut().alumno_legajo = Legajo(7);
    form.draft_mut().curso_id = CursoId(3);
    let submission = form.submit().unwrap();
    transport.clear();

    app.enroll(&submission);
    app.check_incoming();

    assert!(!app.enrollments_view().is_open());
    assert_eq!(app.remount_key(), 1);
    assert_eq!(app.enrollments_view().form().key(), 1);
    assert_eq!(transport.count(Method::Get, "/inscripciones"), 1);
    // the closed form waits for its next opening to reload its lists
    assert_eq!(transport.count(Method::Get, "/alumnos"), 0);
}

#[test]
fn course_deletion_waits_for_confirmation() {
    let transport = MockTransport::new(backend);
    let mut app = start(transport.clone(), &egui::Context::default());
    transport.clear();

    app.request_delete(DeleteTarget::course(CursoId(3)));
    assert_eq!(
        app.pending_delete().map(|t| t.prompt.as_str()),
        Some("¿Estás seguro de eliminar el curso 3?")
    );
    app.cancel_delete();
    app.check_incoming();
    assert!(app.pending_delete().is_none());
    assert!(transport.requests().is_empty());
    assert_eq!(app.cursos().len(), 1);

    app.request_delete(DeleteTarget::course(CursoId(3)));
    app.confirm_delete();
    app.check_incoming();
    assert_eq!(transport.count(Method::Delete, "/cursos/3"), 1);
    assert_eq!(transport.count(Method::Get, "/cursos"), 1);
    assert_eq!(app.remount_key(), 1);
    assert_eq!(app.notice(), None);
}

#[test]
fn failed_deletion_is_reported() {
    let transport = MockTransport::new(|request| match request.method {
        Method::Delete => Ok(MockTransport::text(500, "")),
        _ => backend(request),
    });
    let mut app = start(transport.clone(), &egui::Context::default());
    transport.clear();

    app.request_delete(DeleteTarget::enrollment(InscripcionId(5)));
    app.confirm_delete();
    app.check_incoming();

    assert_eq!(app.notice(), Some("No se pudo eliminar (500)."));
    assert_eq!(transport.count(Method::Get, "/inscripciones"), 0);
    assert_eq!(app.inscripciones().len(), 3);
}

#[test]
fn status_change_patches_and_refreshes() {
    let transport = MockTransport::new(backend);
    let mut app = start(transport.clone(), &egui::Context::default());
    transport.clear();

    app.change_status(InscripcionId(9), EstadoInscripcion::Activo);
    app.check_incoming();

    let patch = &transport.requests()[0];
    assert_eq!(patch.method, Method::Patch);
    assert_eq!(path(patch), "/inscripciones/9");
    assert_eq!(MockTransport::body_of(patch), Some(json!({ "estado": "ACTIVO" })));
    assert_eq!(transport.count(Method::Get, "/inscripciones"), 1);
}

#[test]
fn grade_registration_refreshes_enrollments() {
    let transport = MockTransport::new(backend);
    let mut app = start(transport.clone(), &egui::Context::default());
    let activo = app.inscripciones().items()[0].clone();
    let completado = app.inscripciones().items()[1].clone();

    assert!(!app.enrollment_list().open_grade_dialog(&completado));
    assert!(app.enrollment_list().open_grade_dialog(&activo));
    let dialog = app.enrollment_list().grade_dialog_mut();
    dialog.set_input("Final", "7.5");
    let submission = dialog.submit().unwrap();
    transport.clear();

    app.register_grade(activo.id, &submission);
    app.check_incoming();

    assert_eq!(transport.count(Method::Post, "/notas"), 1);
    assert_eq!(transport.count(Method::Get, "/inscripciones"), 1);
    let dialog = app.enrollment_list().grade_dialog();
    assert!(dialog.is_open());
    assert_eq!(dialog.feedback().success(), Some("Nota 7.50 registrada con éxito."));
}

#[test]
fn grade_answer_for_a_closed_dialog_is_not_shown_in_the_next_one() {
    let transport = MockTransport::new(backend);
    let mut app = start(transport.clone(), &egui::Context::default());
    let first = app.inscripciones().items()[0].clone();
    let second = app.inscripciones().items()[2].clone();

    app.enrollment_list().open_grade_dialog(&first);
    let dialog = app.enrollment_list().grade_dialog_mut();
    dialog.set_input("Final", "7.5");
    let submission = dialog.submit().unwrap();
    transport.clear();
    app.register_grade(first.id, &submission);

    // the answer is still queued while the user moves on to another enrollment
    app.enrollment_list().grade_dialog_mut().close();
    app.enrollment_list().open_grade_dialog(&second);
    app.enrollment_list().grade_dialog_mut().set_input("Parcial", "3");
    app.check_incoming();

    let dialog = app.enrollment_list().grade_dialog();
    assert_eq!(dialog.target().map(|i| i.id), Some(InscripcionId(9)));
    assert_eq!(dialog.feedback().success(), None);
    assert_eq!(app.enrollment_list().tick(100.0), None);
    assert!(app.enrollment_list().grade_dialog().is_open());
    // the grade of the first enrollment was stored all the same
    assert_eq!(transport.count(Method::Get, "/inscripciones"), 1);
}

#[test]
fn saved_course_reloads_the_open_enrollment_form() {
    let transport = MockTransport::new(|request| match (request.method, path(request)) {
        (Method::Post, "/cursos") => Ok(MockTransport::json(201, curso())),
        _ => backend(request),
    });
    let mut app = start(transport.clone(), &egui::Context::default());
    app.open_enrollment_form();
    app.check_incoming();
    assert_eq!(app.enrollments_view().form().key(), 0);

    app.courses_view().open_create();
    let form = app.courses_view().form_mut();
    let draft = form.draft_mut();
    draft.nombre = "Algebra".to_string();
    draft.duracion = 40;
    draft.profesor_legajo = Legajo(12);
    let submission = form.submit().unwrap();
    transport.clear();

    app.save_course(&submission);
    app.check_incoming();
    app.check_incoming();

    assert_eq!(transport.count(Method::Post, "/cursos"), 1);
    assert_eq!(transport.count(Method::Get, "/cursos"), 2);
    assert_eq!(transport.count(Method::Get, "/alumnos"), 1);

    assert_eq!(app.remount_key(), 1);
    let view = app.enrollments_view();
    assert!(view.is_open());
    let form = view.form();
    assert_eq!(form.key(), 1);
    assert!(!form.students().is_loading());
    assert!(!form.courses().is_loading());
    assert_eq!(form.students().len(), 1);
    assert_eq!(form.courses().len(), 1);
}

#[test]
fn course_form_ignores_professors_of_an_earlier_opening() {
    let calls = Arc::new(Mutex::new(0));
    let counter = calls.clone();
    let transport = MockTransport::new(move |request| match (request.method, path(request)) {
        (Method::Get, "/profesores") => {
            let mut calls = counter.lock().unwrap();
            *calls += 1;
            // startup, first opening, second opening
            if *calls == 3 {
                Err("connection refused".to_string())
            } else {
                backend(request)
            }
        }
        _ => backend(request),
    });
    let mut app = start(transport, &egui::Context::default());

    app.courses_view().open_create();
    app.load_course_form_professors();
    app.courses_view().open_create();
    app.load_course_form_professors();
    app.check_incoming();

    assert_eq!(*calls.lock().unwrap(), 3);
    let professors = app.courses_view().form().professors();
    assert!(!professors.is_loading());
    assert!(professors.is_empty());
    assert_eq!(
        professors.error(),
        Some("Error cargando la lista de profesores. ¿El backend está corriendo?")
    );
}

#[test]
fn address_bar_and_tabs_stay_in_step() {
    let mut app = start(MockTransport::new(backend), &egui::Context::default());

    app.navigate(Route::Courses);
    app.follow_location("#/cursos");
    assert_eq!(app.route(), Some(Route::Courses));

    // back button
    app.follow_location("#/alumnos");
    assert_eq!(app.route(), Some(Route::Students));
    app.follow_location("#/notas");
    assert_eq!(app.route(), None);
    app.follow_location("");
    assert_eq!(app.route(), Some(Route::Dashboard));
}

#[test]
fn every_page_renders() {
    let ctx = egui::Context::default();
    let transport = MockTransport::new(backend);
    let mut app = start(transport, &ctx);
    app.enrollment_list().toggle_grades(InscripcionId(5));

    for route in Route::ALL {
        app.navigate(route);
        let _ = ctx.run(egui::RawInput::default(), |ctx| app.ui(ctx));
    }

    app.open_enrollment_form();
    app.navigate(Route::Enrollments);
    app.courses_view().open_create();
    app.request_delete(DeleteTarget::student(Legajo(7)));
    let _ = ctx.run(egui::RawInput::default(), |ctx| app.ui(ctx));
    assert_eq!(app.enrollments_view().form().courses().len(), 1);

    let mut lost = HttpApp::with_client(
        ctx.clone(),
        ApiClient::new(ROOT, MockTransport::new(backend)),
        None,
    );
    let _ = ctx.run(egui::RawInput::default(), |ctx| lost.ui(ctx));
    assert_eq!(lost.route(), None);
}
