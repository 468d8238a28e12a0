/// Pages reachable from the tab strip
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Enrollments,
    Professors,
    Courses,
    Students,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Dashboard,
        Route::Enrollments,
        Route::Professors,
        Route::Courses,
        Route::Students,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Dashboard => "/",
            Route::Enrollments => "/inscripciones",
            Route::Professors => "/profesores",
            Route::Courses => "/cursos",
            Route::Students => "/alumnos",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim();
        let path = path.strip_prefix('#').unwrap_or(path);
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Some(Route::Dashboard);
        }
        Self::ALL
            .into_iter()
            .find(|route| route.path() == trimmed)
    }

    /// location fragment of the page, as the browser reports it
    pub fn hash(self) -> String {
        format!("#{}", self.path())
    }

    pub fn tab_label(self) -> &'static str {
        match self {
            Route::Dashboard => "Inicio / Dashboard",
            Route::Enrollments => "Inscripciones",
            Route::Professors => "Profesores",
            Route::Courses => "Cursos",
            Route::Students => "Alumnos",
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn read_hash() -> Option<String> {
    web_sys::window()?.location().hash().ok()
}

#[cfg(target_arch = "wasm32")]
pub fn write_hash(route: Route) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(e) = window.location().set_hash(route.path()) {
        log::warn!("Could not update the address bar: {e:?}");
    }
}
