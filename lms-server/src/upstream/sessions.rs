use super::{LmsClient, LmsError};
use serde_json::Value;

/// Optional pagination and participant filters for the session listing.
/// The status filter is not optional and lives on the call itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub participant_ids: Option<Vec<i64>>,
}

impl SessionListQuery {
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            params.push(("per_page", per_page.to_string()));
        }
        if let Some(participant_ids) = &self.participant_ids {
            for participant_id in participant_ids {
                params.push(("participant_ids[]", participant_id.to_string()));
            }
        }
        params
    }
}

impl LmsClient {
    /// Lists the sessions of a course. The status filter is always sent,
    /// even when every optional parameter is absent.
    pub async fn course_sessions_list(
        &mut self,
        course_id: i64,
        session_status: &str,
        query: &SessionListQuery,
    ) -> Result<Value, LmsError> {
        let url = self.api_url(&format!("courses/{}/course_sessions", course_id));
        let mut params = vec![("filter", session_status.to_string())];
        params.extend(query.to_params());
        self.send_authorized(move |http| http.get(url).query(&params))
            .await
    }

    /// Registers a user for a session. The payload is passed through to
    /// the upstream as-is.
    pub async fn register_for_session(
        &mut self,
        session_id: i64,
        payload: &Value,
    ) -> Result<Value, LmsError> {
        let url = self.api_url(&format!("course_sessions/{}/register", session_id));
        let body = payload.clone();
        self.send_authorized(move |http| http.post(url).json(&body))
            .await
    }
}
