//! Handler return values.

use axum::response::Response;
use serde::Serialize;
use serde_json::Value;

use super::exception::HttpException;

/// What a handler produced.
#[derive(Debug)]
pub enum Reply {
    /// A finished response; returned to the client untouched.
    Native(Response),
    /// A value serialized as a 200 JSON body.
    Json(Value),
    /// Nothing; the hosting server decides what the client sees.
    Empty,
}

impl Reply {
    /// Serialize any value into a JSON reply.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, HttpException> {
        Ok(Reply::Json(serde_json::to_value(value)?))
    }
}

/// Conversion from handler return types into [`Reply`].
pub trait IntoReply: Send {
    fn into_reply(self) -> Result<Reply, HttpException>;
}

impl IntoReply for Reply {
    fn into_reply(self) -> Result<Reply, HttpException> {
        Ok(self)
    }
}

impl IntoReply for Response {
    fn into_reply(self) -> Result<Reply, HttpException> {
        Ok(Reply::Native(self))
    }
}

impl IntoReply for Value {
    fn into_reply(self) -> Result<Reply, HttpException> {
        Ok(Reply::Json(self))
    }
}

impl IntoReply for () {
    fn into_reply(self) -> Result<Reply, HttpException> {
        Ok(Reply::Empty)
    }
}

impl<T: IntoReply> IntoReply for Option<T> {
    fn into_reply(self) -> Result<Reply, HttpException> {
        match self {
            Some(inner) => inner.into_reply(),
            None => Ok(Reply::Empty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct User {
        id: u64,
        name: &'static str,
    }

    #[test]
    fn test_json_from_struct() {
        let reply = Reply::json(&User { id: 1, name: "ada" }).unwrap();
        match reply {
            Reply::Json(v) => assert_eq!(v, json!({ "id": 1, "name": "ada" })),
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[test]
    fn test_option_none_is_empty() {
        assert!(matches!(None::<Value>.into_reply(), Ok(Reply::Empty)));
        assert!(matches!(Some(json!(1)).into_reply(), Ok(Reply::Json(_))));
    }
}
