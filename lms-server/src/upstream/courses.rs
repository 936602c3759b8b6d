use super::{LmsClient, LmsError};
use serde_json::Value;

/// Optional pagination and type filters for the course listing.
///
/// Parameters left unset are omitted from the request entirely, never sent
/// as empty values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub types: Option<Vec<i64>>,
}

impl CourseListQuery {
    /// Encodes the query in the upstream's expected order: `page`,
    /// `per_page`, then repeated `types[]` pairs.
    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            params.push(("per_page", per_page.to_string()));
        }
        if let Some(types) = &self.types {
            for course_type in types {
                params.push(("types[]", course_type.to_string()));
            }
        }
        params
    }
}

impl LmsClient {
    /// Fetches the paginated course listing.
    pub async fn courses_list(&mut self, query: &CourseListQuery) -> Result<Value, LmsError> {
        let url = self.api_url("courses/");
        let params = query.to_params();
        self.send_authorized(move |http| {
            let mut request = http.get(url);
            if !params.is_empty() {
                request = request.query(&params);
            }
            request
        })
        .await
    }

    /// Fetches a single course by its upstream identifier.
    pub async fn course_detail(&mut self, course_id: i64) -> Result<Value, LmsError> {
        let url = self.api_url(&format!("courses/{}", course_id));
        self.send_authorized(move |http| http.get(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::tests::{mock_ping, test_client};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_courses_list_without_arguments_sends_no_query() {
        let mock = MockServer::start().await;
        mock_ping(&mock, 200).await;
        Mock::given(method("GET"))
            .and(path("/endpoint/v1/courses/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock)
            .await;

        let mut client = test_client(&mock);
        client
            .courses_list(&CourseListQuery::default())
            .await
            .expect("Failed to list courses");

        let requests = mock.received_requests().await.unwrap();
        let listing = requests
            .iter()
            .find(|r| r.url.path() == "/endpoint/v1/courses/")
            .expect("No listing request recorded");
        assert_eq!(listing.url.query(), None);
    }

    #[tokio::test]
    async fn test_courses_list_encodes_parameters_in_order() {
        let mock = MockServer::start().await;
        mock_ping(&mock, 200).await;
        Mock::given(method("GET"))
            .and(path("/endpoint/v1/courses/"))
            .and(query_param("page", "2"))
            .and(query_param("per_page", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock)
            .await;

        let mut client = test_client(&mock);
        let query = CourseListQuery {
            page: Some(2),
            per_page: Some(10),
            types: Some(vec![1, 2]),
        };
        client
            .courses_list(&query)
            .await
            .expect("Failed to list courses");

        let requests = mock.received_requests().await.unwrap();
        let listing = requests
            .iter()
            .find(|r| r.url.path() == "/endpoint/v1/courses/")
            .expect("No listing request recorded");
        // Repeated array parameters use bracketed keys, percent-encoded on
        // the wire, in page/per_page/types order.
        assert_eq!(
            listing.url.query(),
            Some("page=2&per_page=10&types%5B%5D=1&types%5B%5D=2")
        );
    }

    #[tokio::test]
    async fn test_course_detail_targets_the_course_path() {
        let mock = MockServer::start().await;
        mock_ping(&mock, 200).await;
        Mock::given(method("GET"))
            .and(path("/endpoint/v1/courses/55894"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": 55894, "name": "Intro"})),
            )
            .expect(1)
            .mount(&mock)
            .await;

        let mut client = test_client(&mock);
        let course = client
            .course_detail(55894)
            .await
            .expect("Failed to fetch course");

        assert_eq!(course["name"], "Intro");
        mock.verify().await;
    }
}
