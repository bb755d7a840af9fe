//! In-memory catalog backing the demo listing endpoints.

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FileRecord {
    pub id: Uuid,
    pub project_id: Uuid,
    pub filename: String,
    pub mime_type: String,
    pub size: i64,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    projects: Vec<Project>,
    files: Vec<FileRecord>,
}

impl Catalog {
    pub fn new(projects: Vec<Project>, files: Vec<FileRecord>) -> Self {
        Self { projects, files }
    }

    /// Three projects and 25 files spread round-robin across them.
    pub fn seeded() -> Self {
        let projects: Vec<Project> = ["photos", "invoices", "avatars"]
            .into_iter()
            .map(|name| Project {
                id: Uuid::new_v4(),
                name: name.to_string(),
            })
            .collect();

        let files = (0..25)
            .map(|n| {
                let project = &projects[n % projects.len()];
                FileRecord {
                    id: Uuid::new_v4(),
                    project_id: project.id,
                    filename: format!("{}-{:02}.png", project.name, n),
                    mime_type: "image/png".to_string(),
                    size: 1024 * (n as i64 + 1),
                }
            })
            .collect();

        Self::new(projects, files)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn file(&self, id: Uuid) -> Option<&FileRecord> {
        self.files.iter().find(|file| file.id == id)
    }

    /// Files of one project, in catalog order. Owns the catalog so the iterator can outlive the caller.
    pub fn stream_files_in_project(catalog: Arc<Self>, project_id: Uuid) -> impl Iterator<Item = FileRecord> + Send + 'static {
        (0..catalog.files.len()).filter_map(move |index| {
            let file = &catalog.files[index];
            (file.project_id == project_id).then(|| file.clone())
        })
    }
}
