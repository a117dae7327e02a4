use crate::{Error, Result, WarehouseApi};
use async_trait::async_trait;
use itemview_types::{
    DisplayAs, DisplayType, ItemKey, ItemPage, ItemPageQuery, ItemSchema, Warehouse,
    WarehouseList, validate_identifier,
};
use reqwest::{Client, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

const API_VERSION: &str = "v1";

#[derive(Serialize)]
struct DisplayAsBody {
    display_as: DisplayAs,
}

/// [`WarehouseApi`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpWarehouseApi {
    client: Client,
    base_url: Url,
}

impl HttpWarehouseApi {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(base_url, Client::new())
    }

    /// Like [`HttpWarehouseApi::new`] but every request gives up after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(base_url, client)
    }

    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|_| Error::InvalidBaseUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/v1/warehouses/{segments...}`; every segment must be an identifier.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        for segment in segments {
            validate_identifier(segment)?;
        }
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| Error::InvalidBaseUrl(self.base_url.to_string()))?;
            path.pop_if_empty().push(API_VERSION).push("warehouses");
            path.extend(segments);
        }
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder, url: &Url) -> Result<T> {
        let response = self.send(request, url).await?;
        Ok(response.json().await?)
    }

    async fn send(&self, request: RequestBuilder, url: &Url) -> Result<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(url = %url, status = status.as_u16(), "Warehouse API response");
        if !status.is_success() {
            return Err(Error::status(status.as_u16(), url.as_str()));
        }
        Ok(response)
    }
}

#[async_trait]
impl WarehouseApi for HttpWarehouseApi {
    async fn list_warehouses(&self) -> Result<Vec<Warehouse>> {
        let url = self.endpoint(&[])?;
        let list: WarehouseList = self.fetch(self.client.get(url.clone()), &url).await?;
        Ok(list.warehouses)
    }

    async fn get_warehouse(&self, name: &str) -> Result<Warehouse> {
        let url = self.endpoint(&[name])?;
        self.fetch(self.client.get(url.clone()), &url).await
    }

    async fn get_items(&self, warehouse: &str, query: &ItemPageQuery) -> Result<ItemPage> {
        let mut url = self.endpoint(&[warehouse, "items"])?;
        url.query_pairs_mut()
            .extend_pairs(query.query_pairs().iter().map(|(k, v)| (*k, v.as_str())));
        self.fetch(self.client.get(url.clone()), &url).await
    }

    async fn set_display_as(
        &self,
        warehouse: &str,
        field: &str,
        display_as: DisplayAs,
    ) -> Result<DisplayType> {
        let url = self.endpoint(&[warehouse, "schema", field])?;
        let request = self
            .client
            .put(url.clone())
            .json(&DisplayAsBody { display_as });

        match display_as {
            DisplayAs::Set(display_type) => {
                self.send(request, &url).await?;
                Ok(display_type)
            }
            DisplayAs::Reset => {
                let schema: ItemSchema = self.fetch(request, &url).await?;
                schema
                    .get(field)
                    .map(|definition| definition.display_as)
                    .ok_or_else(|| {
                        Error::UnexpectedResponse(format!(
                            "reset of {}.{} returned no definition for the field",
                            warehouse, field
                        ))
                    })
            }
        }
    }

    async fn delete_item(&self, warehouse: &str, key: &ItemKey) -> Result<()> {
        if key.is_empty() {
            return Err(Error::UnexpectedResponse(format!(
                "warehouse {} has no primary key to delete by",
                warehouse
            )));
        }
        let mut url = self.endpoint(&[warehouse, "items"])?;
        url.query_pairs_mut().extend_pairs(key.query_pairs());
        self.send(self.client.delete(url.clone()), &url).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_paths() {
        let api = HttpWarehouseApi::new("http://localhost:8000").unwrap();
        assert_eq!(
            api.endpoint(&[]).unwrap().as_str(),
            "http://localhost:8000/v1/warehouses"
        );
        assert_eq!(
            api.endpoint(&["widgets", "schema", "price"]).unwrap().as_str(),
            "http://localhost:8000/v1/warehouses/widgets/schema/price"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let api = HttpWarehouseApi::new("http://example.com/api/").unwrap();
        assert_eq!(
            api.endpoint(&["widgets"]).unwrap().as_str(),
            "http://example.com/api/v1/warehouses/widgets"
        );
    }

    #[test]
    fn test_endpoint_rejects_non_identifiers() {
        let api = HttpWarehouseApi::new("http://localhost:8000").unwrap();
        assert!(matches!(
            api.endpoint(&["../admin"]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            HttpWarehouseApi::new("not a url"),
            Err(Error::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            HttpWarehouseApi::new("mailto:someone@example.com"),
            Err(Error::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_display_as_body() {
        let body = serde_json::to_string(&DisplayAsBody {
            display_as: DisplayAs::Reset,
        })
        .unwrap();
        assert_eq!(body, r#"{"display_as":"reset"}"#);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_an_error() {
        let api = HttpWarehouseApi::with_timeout("http://127.0.0.1:9", Duration::from_millis(200))
            .unwrap();
        assert!(api.list_warehouses().await.is_err());
    }
}
