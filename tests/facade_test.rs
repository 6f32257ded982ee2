//! Integration tests for the QueryCraft facade
//!
//! Runs against the in-process connection, checking the statements that
//! reach the adapter and how results and failures come back.

use querycraft::prelude::*;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub uid: Option<u64>,
    pub title: String,
    pub author: u64,
}

impl TableModel for Article {
    fn table_name() -> &'static str {
        "articles"
    }
}

fn setup(config: RepositoryConfig) -> (Arc<MemoryConnection>, QueryCraft) {
    let connection = Arc::new(MemoryConnection::new());
    let querycraft = QueryCraft::with_connection(connection.clone()).with_repository_config(config);
    (connection, querycraft)
}

#[tokio::test]
async fn test_insert_returns_generated_id() {
    let (connection, querycraft) = setup(RepositoryConfig::default());

    let fields = FieldMap::new().with("title", "Hello").with("author", 3);
    let uid = querycraft.insert("articles", &fields).await.unwrap();

    assert_eq!(uid, 1);
    assert_eq!(
        connection.last_statement().unwrap(),
        "INSERT INTO `articles` (`title`, `author`) VALUES ('Hello', 3)"
    );
}

#[tokio::test]
async fn test_insert_without_generated_id() {
    let (connection, querycraft) = setup(RepositoryConfig::default());

    querycraft
        .insert("articles", &FieldMap::new().with("title", "a"))
        .await
        .unwrap();
    connection.push_insert_id(0);
    let uid = querycraft
        .insert("tags", &FieldMap::new().with("code", "rust"))
        .await
        .unwrap();

    assert_eq!(uid, 0);
}

#[tokio::test]
async fn test_update_rereads_matching_rows() {
    let (connection, querycraft) = setup(RepositoryConfig::default());
    connection.push_json_rows(json!([{"uid": 1, "title": "Renamed", "author": 3}]));

    let fields = FieldMap::new().with("title", "Renamed");
    let rows = querycraft
        .update("articles", &fields, vec![("author", 3).into()])
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["title"], json!("Renamed"));
    assert_eq!(
        connection.statements(),
        vec![
            "UPDATE `articles` SET `title`='Renamed' WHERE ((`author` = 3))".to_string(),
            "SELECT * FROM `articles` WHERE ((`author` = 3))".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_update_failure_in_silent_mode() {
    let (connection, querycraft) = setup(RepositoryConfig::new("uid".to_string(), false));
    connection.fail_next("read-only table");

    let fields = FieldMap::new().with("title", "x");
    let rows = querycraft.update("articles", &fields, Vec::new()).await.unwrap();

    assert!(rows.is_empty());
    assert_eq!(connection.statements().len(), 1);
    assert!(connection.has_error());
}

#[tokio::test]
async fn test_delete_with_restrictions() {
    let (connection, querycraft) = setup(RepositoryConfig::default());
    connection.push_affected_rows(2);

    let removed = querycraft
        .delete(
            "articles",
            vec![("author", json!([1, 2]), "IN").into(), "`uid` > 10".into()],
        )
        .await
        .unwrap();

    assert_eq!(removed, 2);
    assert_eq!(
        connection.last_statement().unwrap(),
        "DELETE FROM `articles` WHERE ((`author` IN (1,2)) AND (`uid` > 10))"
    );
}

#[tokio::test]
async fn test_failure_raised_by_default() {
    let (connection, querycraft) = setup(RepositoryConfig::default());
    connection.fail_next("Unknown column 'nope'");

    let err = querycraft
        .delete("articles", vec![("nope", 1).into()])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        QueryCraftError::Query(QueryError::Execution { .. })
    ));
    assert!(err.to_string().contains("Unknown column 'nope'"));
}

#[tokio::test]
async fn test_repository_round_trip() {
    let (connection, querycraft) = setup(RepositoryConfig::default());
    let articles = querycraft.repository::<Article>();

    let uid = articles
        .create(&Article {
            uid: None,
            title: "First".to_string(),
            author: 7,
        })
        .await
        .unwrap();
    assert_eq!(uid, 1);

    connection.push_json_rows(json!([{"uid": 1, "title": "First", "author": 7}]));
    let found = articles.get(uid).await.unwrap().unwrap();
    assert_eq!(found.title, "First");

    connection.push_json_rows(json!([{"cnt": 1}]));
    assert_eq!(articles.count(vec![("author", 7).into()]).await.unwrap(), 1);
}

#[tokio::test]
async fn test_joined_query_through_facade() {
    let (connection, querycraft) = setup(RepositoryConfig::default());

    let mut query = querycraft.create_query("articles", Some("a")).unwrap();
    query
        .create_joined_query("authors", Some("b"), Criterion::eq_property("author", ("b", "uid")))
        .unwrap()
        .push(Criterion::eq("name", "Ann").ignore_case());
    let query = query
        .set_projection(Projection::property_as(("b", "name"), "author_name"))
        .add_order(Order::asc("title"));

    let _rows: Vec<Record> = query.list(ErrorMode::Raise).await.unwrap();
    assert_eq!(
        connection.last_statement().unwrap(),
        "SELECT `b`.`name` AS `author_name` FROM `articles` AS `a` \
         INNER JOIN `authors` AS `b` ON `a`.`author` = `b`.`uid` \
         WHERE (LOWER(`b`.`name`) = 'ann') ORDER BY `a`.`title`"
    );
}

#[tokio::test]
async fn test_health_check() {
    let (connection, querycraft) = setup(RepositoryConfig::default());
    querycraft.health_check().await.unwrap();
    assert_eq!(connection.last_statement().unwrap(), "SELECT 1");

    connection.fail_next("gone away");
    assert!(querycraft.health_check().await.is_err());
}
