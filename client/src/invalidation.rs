//! Which lists go stale after a successful mutation.

use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Entity {
    Professor,
    Student,
    Course,
    Enrollment,
    Grade,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mutation {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CollectionKind {
    Professors,
    Students,
    Courses,
    Enrollments,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Plan {
    pub refetch: &'static [CollectionKind],
    /// the enrollment form caches students and courses for its selection boxes
    pub remount_enrollment_form: bool,
}

impl Plan {
    pub const NOTHING: Plan = Plan {
        refetch: &[],
        remount_enrollment_form: false,
    };

    const fn new(refetch: &'static [CollectionKind], remount_enrollment_form: bool) -> Self {
        Self {
            refetch,
            remount_enrollment_form,
        }
    }
}

use CollectionKind::{Courses, Enrollments, Professors, Students};
use Entity::{Course, Enrollment, Grade, Professor, Student};
use Mutation::{Created, Deleted, Updated};

static POLICY: [(Entity, Mutation, Plan); 13] = [
    (Professor, Created, Plan::new(&[Professors], false)),
    (Professor, Updated, Plan::new(&[Professors], false)),
    (Professor, Deleted, Plan::new(&[Professors], false)),
    (Student, Created, Plan::new(&[Students], true)),
    (Student, Updated, Plan::new(&[Students], true)),
    (Student, Deleted, Plan::new(&[Students], true)),
    (Course, Created, Plan::new(&[Courses], true)),
    (Course, Updated, Plan::new(&[Courses], true)),
    (Course, Deleted, Plan::new(&[Courses], true)),
    // a status change is the only update an enrollment gets
    (Enrollment, Created, Plan::new(&[Enrollments], true)),
    (Enrollment, Updated, Plan::new(&[Enrollments], true)),
    (Enrollment, Deleted, Plan::new(&[Enrollments], true)),
    // grades are embedded in their enrollment
    (Grade, Created, Plan::new(&[Enrollments], true)),
];

pub fn plan(entity: Entity, mutation: Mutation) -> Plan {
    POLICY
        .iter()
        .find(|(e, m, _)| *e == entity && *m == mutation)
        .map(|(_, _, plan)| *plan)
        .unwrap_or(Plan::NOTHING)
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Created => "created",
            Updated => "updated",
            Deleted => "deleted",
        })
    }
}
