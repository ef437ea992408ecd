//! MongoDB implementation of the document store port.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{self, Bson, doc};
use mongodb::error::{Error as MongoError, ErrorKind};
use serde_json::Value;

use quill_core::domain::{Filter, FilterValue};
use quill_core::error::RepoError;
use quill_core::ports::{Document, DocumentStore, Namespace};

use super::connections::MongoDocumentStore;

/// Classify driver errors: unreachable server vs failed operation.
pub(crate) fn map_mongo_error(err: MongoError) -> RepoError {
    match err.kind.as_ref() {
        ErrorKind::Io(_)
        | ErrorKind::ServerSelection { .. }
        | ErrorKind::ConnectionPoolCleared { .. } => RepoError::Connection(err.to_string()),
        _ => RepoError::Query(err.to_string()),
    }
}

fn to_bson_document(document: &Document) -> Result<bson::Document, RepoError> {
    bson::to_document(document).map_err(|e| RepoError::Serialization(e.to_string()))
}

/// Convert a stored document back to JSON, dropping the driver-assigned `_id`.
fn from_bson_document(mut document: bson::Document) -> Document {
    document.remove("_id");
    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(map) => map,
        _ => Document::new(),
    }
}

/// `Missing` becomes a null match, which MongoDB treats as "null or absent".
fn filter_document(filter: &Filter) -> Result<bson::Document, RepoError> {
    let mut query = bson::Document::new();
    for (field, expected) in filter.iter() {
        let value = match expected {
            FilterValue::Equals(value) => {
                bson::to_bson(value).map_err(|e| RepoError::Serialization(e.to_string()))?
            }
            FilterValue::Missing => Bson::Null,
        };
        query.insert(field, value);
    }
    Ok(query)
}

impl MongoDocumentStore {
    fn collection(&self, ns: &Namespace) -> Collection<bson::Document> {
        self.client
            .database(&ns.database)
            .collection(&ns.collection)
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    async fn ping(&self) -> Result<(), RepoError> {
        self.run_ping().await
    }

    async fn insert_one(&self, ns: &Namespace, document: Document) -> Result<(), RepoError> {
        self.collection(ns)
            .insert_one(to_bson_document(&document)?)
            .await
            .map_err(map_mongo_error)?;
        Ok(())
    }

    async fn update_one(
        &self,
        ns: &Namespace,
        filter: &Filter,
        document: Document,
    ) -> Result<u64, RepoError> {
        let result = self
            .collection(ns)
            .update_one(
                filter_document(filter)?,
                doc! { "$set": to_bson_document(&document)? },
            )
            .await
            .map_err(map_mongo_error)?;
        Ok(result.matched_count)
    }

    async fn delete_many(&self, ns: &Namespace, filter: &Filter) -> Result<u64, RepoError> {
        let result = self
            .collection(ns)
            .delete_many(filter_document(filter)?)
            .await
            .map_err(map_mongo_error)?;
        Ok(result.deleted_count)
    }

    async fn find_one(&self, ns: &Namespace, filter: &Filter) -> Result<Option<Document>, RepoError> {
        let found = self
            .collection(ns)
            .find_one(filter_document(filter)?)
            .sort(doc! { "_id": 1 })
            .await
            .map_err(map_mongo_error)?;
        Ok(found.map(from_bson_document))
    }

    async fn find(
        &self,
        ns: &Namespace,
        filter: &Filter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Document>, RepoError> {
        let limit = i64::try_from(limit).map_err(|e| RepoError::Query(e.to_string()))?;
        let cursor = self
            .collection(ns)
            .find(filter_document(filter)?)
            .sort(doc! { "_id": 1 })
            .skip(skip)
            .limit(limit)
            .await
            .map_err(map_mongo_error)?;

        let documents: Vec<bson::Document> = cursor.try_collect().await.map_err(map_mongo_error)?;
        Ok(documents.into_iter().map(from_bson_document).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_document() {
        let filter = Filter::new()
            .eq("IsPublished", true)
            .eq("AuthorID", "admin")
            .missing("PublishedAt");

        let query = filter_document(&filter).unwrap();

        assert!(query.get_bool("IsPublished").unwrap());
        assert_eq!(query.get_str("AuthorID").unwrap(), "admin");
        assert_eq!(query.get("PublishedAt"), Some(&Bson::Null));
    }

    #[test]
    fn test_document_conversion_drops_object_id() {
        let stored = doc! {
            "_id": bson::oid::ObjectId::new(),
            "Slug": "hello-world",
            "Version": 1_i64,
            "IsPublished": false,
            "PublishedAt": Bson::Null,
        };

        let document = from_bson_document(stored);

        assert_eq!(
            Value::Object(document),
            json!({
                "Slug": "hello-world",
                "Version": 1,
                "IsPublished": false,
                "PublishedAt": null,
            })
        );
    }

    #[test]
    fn test_json_document_to_bson() {
        let document = json!({"Slug": "a", "Version": 1, "Tags": ["x"]})
            .as_object()
            .cloned()
            .unwrap();

        let converted = to_bson_document(&document).unwrap();

        assert_eq!(converted.get_str("Slug").unwrap(), "a");
        assert!(converted.get_array("Tags").is_ok());
    }
}
