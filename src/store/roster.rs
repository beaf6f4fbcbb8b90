// src/store/roster.rs

use std::collections::HashSet;
use std::path::PathBuf;

use crate::{
    error::AppError,
    models::roster::{
        CreateClassRequest, CreateStudentRequest, SchoolClass, Student, StudentFilter,
        UpdateStudentRequest,
    },
    store::JsonFile,
    utils::{generate_id, normalize_name},
};

/// Classes (`classes.json`) and students (`students.json`).
///
/// Students point at classes through `(klasse, jahrgang)` strings only.
/// Nothing here checks that the referenced class exists, and deleting a
/// class leaves its students in place.
#[derive(Debug)]
pub struct RosterStore {
    classes: JsonFile<SchoolClass>,
    students: JsonFile<Student>,
}

impl RosterStore {
    pub async fn open(
        classes_path: impl Into<PathBuf>,
        students_path: impl Into<PathBuf>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            classes: JsonFile::open(classes_path).await?,
            students: JsonFile::open(students_path).await?,
        })
    }

    // --- Classes ---

    /// All classes, or only those owned by `lehrer` (normalized match).
    pub async fn list_classes(&self, lehrer: Option<&str>) -> Vec<SchoolClass> {
        let classes = self.classes.load().await;
        match lehrer {
            Some(lehrer) => {
                let wanted = normalize_name(lehrer);
                classes
                    .into_iter()
                    .filter(|c| normalize_name(&c.lehrer) == wanted)
                    .collect()
            }
            None => classes,
        }
    }

    pub async fn find_class(&self, name: &str, jahrgang: &str) -> Option<SchoolClass> {
        self.classes
            .load()
            .await
            .into_iter()
            .find(|c| c.is(name, jahrgang))
    }

    /// Creates a class. A class with the same `(name, jahrgang)` is a `BadRequest`.
    /// Returns the full class list after insertion.
    pub async fn create_class(
        &self,
        req: CreateClassRequest,
    ) -> Result<Vec<SchoolClass>, AppError> {
        self.classes
            .update(|classes| {
                if classes.iter().any(|c| c.is(&req.name, &req.jahrgang)) {
                    return Err(AppError::BadRequest(format!(
                        "Class {} in Jahrgang {} already exists",
                        req.name, req.jahrgang
                    )));
                }

                classes.push(SchoolClass {
                    name: req.name,
                    jahrgang: req.jahrgang,
                    lehrer: req.lehrer.unwrap_or_default(),
                });
                Ok(classes.clone())
            })
            .await
    }

    /// Assigns the class to `lehrer`. A `None` teacher leaves the class untouched.
    pub async fn update_class_teacher(
        &self,
        name: &str,
        jahrgang: &str,
        lehrer: Option<String>,
    ) -> Result<SchoolClass, AppError> {
        self.classes
            .update(|classes| {
                let class = classes
                    .iter_mut()
                    .find(|c| c.is(name, jahrgang))
                    .ok_or(AppError::NotFound("Class not found".to_string()))?;

                if let Some(lehrer) = lehrer {
                    class.lehrer = lehrer;
                }
                Ok(class.clone())
            })
            .await
    }

    /// Removes a class. Its students and results are kept as they are.
    pub async fn delete_class(&self, name: &str, jahrgang: &str) -> Result<(), AppError> {
        self.classes
            .update(|classes| {
                let initial = classes.len();
                classes.retain(|c| !c.is(name, jahrgang));
                if classes.len() == initial {
                    return Err(AppError::NotFound("Class not found".to_string()));
                }
                Ok(())
            })
            .await
    }

    /// Teacher of the class a student belongs to, if any.
    ///
    /// Classes stored without a Jahrgang match every Jahrgang of that name.
    pub async fn teacher_of(&self, student: &Student) -> Option<String> {
        self.classes
            .load()
            .await
            .into_iter()
            .find(|c| c.contains(student))
            .map(|c| c.lehrer)
    }

    // --- Students ---

    /// Students matching every filter that is set.
    ///
    /// The `lehrer` filter keeps students sitting in a class owned by that
    /// teacher, by the same rule [`RosterStore::teacher_of`] uses.
    pub async fn list_students(&self, filter: &StudentFilter) -> Vec<Student> {
        let mut students = self.students.load().await;

        if let Some(lehrer) = filter.lehrer.as_deref() {
            let owned = self.list_classes(Some(lehrer)).await;
            students.retain(|s| owned.iter().any(|c| c.contains(s)));
        }

        if let Some(klasse) = filter.klasse.as_deref() {
            students.retain(|s| s.klasse == klasse);
        }

        if let Some(jahrgang) = filter.jahrgang.as_deref() {
            students.retain(|s| s.jahrgang == jahrgang);
        }

        students
    }

    pub async fn get_student(&self, id: &str) -> Option<Student> {
        self.students
            .load()
            .await
            .into_iter()
            .find(|s| s.id == id)
    }

    pub async fn create_student(&self, req: CreateStudentRequest) -> Result<Student, AppError> {
        let lehrjahr = req
            .lehrjahr
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| req.jahrgang.clone());

        let student = Student {
            id: generate_id(),
            name: req.name,
            klasse: req.klasse,
            jahrgang: req.jahrgang,
            lehrjahr,
        };

        self.students
            .update(|students| {
                students.push(student.clone());
                Ok(())
            })
            .await?;

        Ok(student)
    }

    /// Renames and/or moves a student. Only fields present in `patch` change;
    /// an empty name is ignored.
    pub async fn update_student(
        &self,
        id: &str,
        patch: UpdateStudentRequest,
    ) -> Result<Student, AppError> {
        self.students
            .update(|students| {
                let student = students
                    .iter_mut()
                    .find(|s| s.id == id)
                    .ok_or(AppError::NotFound("Student not found".to_string()))?;

                if let Some(name) = patch.name.filter(|n| !n.trim().is_empty()) {
                    student.name = name;
                }
                if let Some(lehrjahr) = patch.lehrjahr {
                    student.lehrjahr = lehrjahr;
                }
                if let Some(klasse) = patch.klasse {
                    student.klasse = klasse;
                }
                if let Some(jahrgang) = patch.jahrgang {
                    student.jahrgang = jahrgang;
                }
                Ok(student.clone())
            })
            .await
    }

    /// Moves every listed student into `(klasse, jahrgang)`.
    /// Unknown ids are skipped; returns how many students moved.
    pub async fn move_students(
        &self,
        ids: &[String],
        klasse: &str,
        jahrgang: &str,
    ) -> Result<usize, AppError> {
        let ids: HashSet<&str> = ids.iter().map(String::as_str).collect();

        self.students
            .update(|students| {
                let mut moved = 0;
                for student in students.iter_mut().filter(|s| ids.contains(s.id.as_str())) {
                    student.klasse = klasse.to_string();
                    student.jahrgang = jahrgang.to_string();
                    moved += 1;
                }
                if moved == 0 {
                    return Err(AppError::NotFound("No matching students".to_string()));
                }
                Ok(moved)
            })
            .await
    }

    pub async fn delete_student(&self, id: &str) -> Result<(), AppError> {
        self.students
            .update(|students| {
                let initial = students.len();
                students.retain(|s| s.id != id);
                if students.len() == initial {
                    return Err(AppError::NotFound("Student not found".to_string()));
                }
                Ok(())
            })
            .await
    }
}
