use crate::client::api::{ClientResult, EmployeeApi};
use crate::client::form::{EmployeeForm, FormSubmission};
use crate::client::store::{EmployeeStore, EmployeesState};
use crate::models::Employee;

/// One rendered list entry
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRow {
    pub id: String,
    pub name: String,
    pub position: String,
    pub salary: f64,
    /// Absolute photo location, `None` when the record has no photo
    pub photo_src: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    Loading,
    Failed(String),
    Ready {
        /// Id of the employee open in the form, if editing
        editing: Option<String>,
        rows: Vec<EmployeeRow>,
    },
}

/// Photo location for a stored reference, served from the server root.
/// The reference is a single path segment and is percent-encoded as one.
pub fn photo_src(server_root: &str, photo_url: &str) -> Option<String> {
    if photo_url.is_empty() {
        None
    } else {
        Some(format!(
            "{}/{}",
            server_root.trim_end_matches('/'),
            urlencoding::encode(photo_url)
        ))
    }
}

/// List screen: the store plus the employee currently open in the form
pub struct EmployeeList<A> {
    store: EmployeeStore<A>,
    server_root: String,
    employee_to_edit: Option<Employee>,
}

impl<A: EmployeeApi> EmployeeList<A> {
    pub fn new(api: A, server_root: &str) -> Self {
        Self {
            store: EmployeeStore::new(api),
            server_root: server_root.to_string(),
            employee_to_edit: None,
        }
    }

    pub fn store(&self) -> &EmployeeStore<A> {
        &self.store
    }

    /// Initial load
    pub async fn load(&self) {
        let _ = self.store.fetch_employees().await;
    }

    pub fn handle_edit(&mut self, employee: &Employee) {
        self.employee_to_edit = Some(employee.clone());
    }

    pub fn handle_cancel_edit(&mut self) {
        self.employee_to_edit = None;
    }

    pub async fn handle_delete(&self, id: &str) {
        let _ = self.store.remove_employee(id).await;
    }

    /// Close the form and refresh from the server
    pub async fn handle_finish(&mut self) {
        self.employee_to_edit = None;
        let _ = self.store.fetch_employees().await;
    }

    /// Form matching the current mode
    pub fn form(&self) -> EmployeeForm {
        match &self.employee_to_edit {
            Some(employee) => EmployeeForm::for_employee(employee),
            None => EmployeeForm::new(),
        }
    }

    /// Send a form submission through the store; finishes only on success
    pub async fn submit(&mut self, submission: FormSubmission) -> ClientResult<Employee> {
        let result = match &submission {
            FormSubmission::Create(draft) => self.store.add_employee(draft).await,
            FormSubmission::Update { id, draft } => self.store.edit_employee(id, draft).await,
        };
        if result.is_ok() {
            self.handle_finish().await;
        }
        result
    }

    pub async fn view(&self) -> ListView {
        let state = self.store.state().await;
        self.render(state)
    }

    fn render(&self, state: EmployeesState) -> ListView {
        if state.loading {
            return ListView::Loading;
        }
        if let Some(error) = state.error {
            return ListView::Failed(error);
        }

        let rows = state
            .employees
            .into_iter()
            .map(|e| EmployeeRow {
                photo_src: photo_src(&self.server_root, &e.photo_url),
                id: e.id,
                name: e.name,
                position: e.position,
                salary: e.salary,
            })
            .collect();

        ListView::Ready {
            editing: self.employee_to_edit.as_ref().map(|e| e.id.clone()),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::store::tests::{draft, employee, FakeApi};
    use crate::client::store::{StoreAction, Thunk};
    use std::sync::atomic::Ordering;

    #[test]
    fn test_photo_src() {
        assert_eq!(
            photo_src("http://localhost:5000/", "1_ana.png").as_deref(),
            Some("http://localhost:5000/1_ana.png")
        );
        assert_eq!(photo_src("http://localhost:5000", ""), None);
    }

    #[test]
    fn test_photo_src_encodes_reserved_characters() {
        assert_eq!(
            photo_src("http://localhost:5000", "1_my photo#2?.png").as_deref(),
            Some("http://localhost:5000/1_my%20photo%232%3F.png")
        );
    }

    #[tokio::test]
    async fn test_view_after_load() {
        let mut ana = employee("a", "Ana");
        ana.photo_url = "1_ana.png".to_string();
        let list = EmployeeList::new(FakeApi::with(vec![ana]), "http://localhost:5000");

        list.load().await;

        match list.view().await {
            ListView::Ready { editing, rows } => {
                assert!(editing.is_none());
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].photo_src.as_deref(), Some("http://localhost:5000/1_ana.png"));
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_view_shows_error() {
        let list = EmployeeList::new(FakeApi::default(), "http://localhost:5000");
        list.store().dispatch(StoreAction::Pending(Thunk::Fetch)).await;
        assert_eq!(list.view().await, ListView::Loading);

        list.store()
            .dispatch(StoreAction::Rejected(Thunk::Fetch, None))
            .await;
        assert_eq!(
            list.view().await,
            ListView::Failed("Failed to fetch employees".to_string())
        );
    }

    #[tokio::test]
    async fn test_edit_then_submit_clears_edit_target() {
        let ana = employee("a", "Ana");
        let mut list = EmployeeList::new(FakeApi::with(vec![ana.clone()]), "http://localhost:5000");
        list.load().await;

        list.handle_edit(&ana);
        let mut form = list.form();
        assert!(form.is_editing());
        form.position = "Lead".to_string();

        let updated = list.submit(form.submit().unwrap()).await.unwrap();
        assert_eq!(updated.position, "Lead");

        match list.view().await {
            ListView::Ready { editing, rows } => {
                assert!(editing.is_none());
                assert_eq!(rows[0].position, "Lead");
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_edit_target() {
        let ana = employee("a", "Ana");
        let api = FakeApi::with(vec![ana.clone()]);
        api.failing.store(true, Ordering::SeqCst);
        let mut list = EmployeeList::new(api, "http://localhost:5000");
        list.handle_edit(&ana);

        let submission = FormSubmission::Update {
            id: "a".to_string(),
            draft: draft("Ana", "Lead"),
        };
        assert!(list.submit(submission).await.is_err());
        assert!(list.form().is_editing());
    }

    #[tokio::test]
    async fn test_delete_and_cancel() {
        let ana = employee("a", "Ana");
        let mut list = EmployeeList::new(
            FakeApi::with(vec![ana.clone(), employee("b", "Bo")]),
            "http://localhost:5000",
        );
        list.load().await;

        list.handle_edit(&ana);
        list.handle_cancel_edit();
        assert!(!list.form().is_editing());

        list.handle_delete("a").await;
        match list.view().await {
            ListView::Ready { rows, .. } => {
                let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
                assert_eq!(ids, vec!["b"]);
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }
}
