//! Person (account) administration endpoints

use validator::Validate;

use super::ApiClient;
use crate::error::ApiResult;
use crate::models::person::{Person, PersonQuery, UpdatePerson};
use crate::models::Page;

#[derive(Clone)]
pub struct PeopleApi {
    client: ApiClient,
}

impl PeopleApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &PersonQuery) -> ApiResult<Page<Person>> {
        self.client.get_with_query("/people", query).await
    }

    pub async fn get(&self, id: i32) -> ApiResult<Person> {
        self.client.get(&format!("/people/{}", id)).await
    }

    pub async fn update(&self, id: i32, person: &UpdatePerson) -> ApiResult<Person> {
        person.validate()?;
        self.client.put(&format!("/people/{}", id), person).await
    }

    pub async fn remove(&self, id: i32) -> ApiResult<()> {
        self.client.delete(&format!("/people/{}", id)).await
    }
}
