//! `/people` router and request handlers.

use crate::error::ApiError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use log::{error, info, warn};
use people_core::{
    PeopleService, Person, PersonId, PersonInput, PersonQuery, PersonRepository, ServiceResult,
};
use serde::Deserialize;
use std::sync::Arc;

/// Service handle shared by every request task.
pub type SharedService<R> = Arc<PeopleService<R>>;

type ApiResult<T> = Result<T, ApiError>;

/// Query string of `GET /people/search`; exactly one field must be set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub full_name: Option<String>,
    pub hobby: Option<String>,
    pub full_name_starts_with: Option<String>,
    pub hobby_starts_with: Option<String>,
}

impl TryFrom<SearchParams> for PersonQuery {
    type Error = ApiError;

    fn try_from(params: SearchParams) -> Result<Self, Self::Error> {
        let candidates = [
            params.full_name.map(PersonQuery::FullName),
            params.hobby.map(PersonQuery::Hobby),
            params
                .full_name_starts_with
                .map(PersonQuery::FullNameStartingWith),
            params.hobby_starts_with.map(PersonQuery::HobbyStartingWith),
        ];
        let mut selected = candidates.into_iter().flatten();

        match (selected.next(), selected.next()) {
            (Some(query), None) => Ok(query),
            _ => Err(ApiError::BadRequest(
                "exactly one of fullName, hobby, fullNameStartsWith, hobbyStartsWith is required"
                    .to_string(),
            )),
        }
    }
}

/// Builds the HTTP router over `service`.
pub fn build_router<R>(service: SharedService<R>) -> Router
where
    R: PersonRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/ping", get(ping))
        .route("/people", get(list_people::<R>).post(create_person::<R>))
        .route("/people/search", get(search_people::<R>))
        .route(
            "/people/{id}",
            get(get_person::<R>)
                .patch(update_person::<R>)
                .delete(delete_person::<R>),
        )
        .with_state(service)
}

async fn ping() -> &'static str {
    people_core::ping()
}

async fn list_people<R: PersonRepository + Send + Sync + 'static>(
    State(service): State<SharedService<R>>,
) -> ApiResult<Json<Vec<Person>>> {
    let result = run_blocking(&service, |service| service.find_all()).await;
    log_outcome("people_list", &result);
    result.map(Json)
}

async fn get_person<R: PersonRepository + Send + Sync + 'static>(
    State(service): State<SharedService<R>>,
    id: Result<Path<PersonId>, PathRejection>,
) -> ApiResult<Json<Person>> {
    let result = async {
        let id = person_id(id)?;
        run_blocking(&service, move |service| service.find_one(id)).await
    }
    .await;
    log_outcome("person_get", &result);
    result.map(Json)
}

async fn search_people<R: PersonRepository + Send + Sync + 'static>(
    State(service): State<SharedService<R>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Person>>> {
    let result = async {
        let Query(params) =
            params.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        let query = PersonQuery::try_from(params)?;
        run_blocking(&service, move |service| service.search(&query)).await
    }
    .await;
    log_outcome("people_search", &result);
    result.map(Json)
}

async fn create_person<R: PersonRepository + Send + Sync + 'static>(
    State(service): State<SharedService<R>>,
    payload: Result<Json<PersonInput>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let result = async {
        let input = person_input(payload)?;
        run_blocking(&service, move |service| service.save(&input)).await?;
        Ok::<_, ApiError>(StatusCode::OK)
    }
    .await;
    log_outcome("person_create", &result);
    result
}

async fn update_person<R: PersonRepository + Send + Sync + 'static>(
    State(service): State<SharedService<R>>,
    id: Result<Path<PersonId>, PathRejection>,
    payload: Result<Json<PersonInput>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let result = async {
        let id = person_id(id)?;
        let input = person_input(payload)?;
        run_blocking(&service, move |service| service.update(id, &input)).await?;
        Ok::<_, ApiError>(StatusCode::OK)
    }
    .await;
    log_outcome("person_update", &result);
    result
}

async fn delete_person<R: PersonRepository + Send + Sync + 'static>(
    State(service): State<SharedService<R>>,
    id: Result<Path<PersonId>, PathRejection>,
) -> ApiResult<StatusCode> {
    let result = async {
        let id = person_id(id)?;
        run_blocking(&service, move |service| service.delete(id)).await?;
        Ok::<_, ApiError>(StatusCode::OK)
    }
    .await;
    log_outcome("person_delete", &result);
    result
}

/// Runs one service call on the blocking pool; SQLite work and the
/// connection lock never hold a runtime worker.
async fn run_blocking<R, T, F>(service: &SharedService<R>, call: F) -> ApiResult<T>
where
    R: PersonRepository + Send + Sync + 'static,
    T: Send + 'static,
    F: FnOnce(&PeopleService<R>) -> ServiceResult<T> + Send + 'static,
{
    let service = Arc::clone(service);
    let outcome = tokio::task::spawn_blocking(move || call(&service))
        .await
        .map_err(|err| {
            error!("event=blocking_task module=api status=error error={err}");
            ApiError::Internal
        })?;
    outcome.map_err(ApiError::from)
}

fn person_id(id: Result<Path<PersonId>, PathRejection>) -> ApiResult<PersonId> {
    id.map(|Path(id)| id)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

// Bodies that do not decode never reach validation.
fn person_input(payload: Result<Json<PersonInput>, JsonRejection>) -> ApiResult<PersonInput> {
    payload
        .map(|Json(input)| input)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

fn log_outcome<T>(event: &str, result: &ApiResult<T>) {
    match result {
        Ok(_) => info!("event={event} module=api status=ok"),
        Err(err) => warn!(
            "event={event} module=api status=error http_status={} message={}",
            err.status_code().as_u16(),
            err.message()
        ),
    }
}
