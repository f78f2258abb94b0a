use actix_web::{HttpMessage, HttpRequest};
use serde_json::{Map, Value};

use crate::db::models::{NewVideo, VideoChanges};
use crate::error::{AppError, Result};

const NAME: (&str, &str) = ("name", "name of the video");
const VIEWS: (&str, &str) = ("views", "number of views of the video");
const LIKES: (&str, &str) = ("likes", "number of likes of the video");

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Raw request arguments collected from the body and the query string.
///
/// The body is read as a url-encoded form when the request says so and as a
/// JSON object otherwise. Body values shadow query values with the same key,
/// and the first occurrence of a repeated key wins. `null` counts as absent.
#[derive(Debug, Default)]
pub struct VideoArgs {
    fields: Map<String, Value>,
}

impl VideoArgs {
    pub fn from_request(req: &HttpRequest, body: &[u8]) -> Result<Self> {
        let mut fields = if body.iter().all(u8::is_ascii_whitespace) {
            Map::new()
        } else if req.content_type() == FORM_CONTENT_TYPE {
            let mut map = Map::new();
            extend_with_pairs(&mut map, decode_pairs(body, "form body")?);
            map
        } else {
            match serde_json::from_slice::<Value>(body) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    return Err(AppError::BadRequest(
                        "request body must be a JSON object".to_string(),
                    ))
                }
                Err(e) => return Err(AppError::BadRequest(format!("malformed JSON body: {e}"))),
            }
        };

        let query = decode_pairs(req.query_string().as_bytes(), "query string")?;
        extend_with_pairs(&mut fields, query);

        Ok(Self { fields })
    }

    /// All three fields must be present.
    pub fn into_new_video(self) -> Result<NewVideo> {
        Ok(NewVideo {
            name: required(self.string(NAME)?, NAME)?,
            views: required(self.integer(VIEWS)?, VIEWS)?,
            likes: required(self.integer(LIKES)?, LIKES)?,
        })
    }

    pub fn into_changes(self) -> Result<VideoChanges> {
        Ok(VideoChanges {
            name: self.string(NAME)?,
            views: self.integer(VIEWS)?,
            likes: self.integer(LIKES)?,
        })
    }

    fn string(&self, (field, help): (&'static str, &str)) -> Result<Option<String>> {
        match self.fields.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(_) => Err(invalid(field, format!("{help} must be a string"))),
        }
    }

    fn integer(&self, (field, help): (&'static str, &str)) -> Result<Option<i32>> {
        let parsed = match self.fields.get(field) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(n) => i32::try_from(n).ok(),
                // 1.0 is accepted as 1, 1.5 is not
                None => n
                    .as_f64()
                    .filter(|f| f.fract() == 0.0)
                    .filter(|f| (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(f))
                    .map(|f| f as i32),
            },
            Some(Value::String(s)) => s.trim().parse::<i32>().ok(),
            Some(_) => None,
        };
        parsed
            .map(Some)
            .ok_or_else(|| invalid(field, format!("{help} must be an integer")))
    }
}

fn decode_pairs(input: &[u8], source: &str) -> Result<Vec<(String, String)>> {
    serde_urlencoded::from_bytes(input)
        .map_err(|e| AppError::BadRequest(format!("malformed {source}: {e}")))
}

fn extend_with_pairs(fields: &mut Map<String, Value>, pairs: Vec<(String, String)>) {
    for (key, value) in pairs {
        fields.entry(key).or_insert(Value::String(value));
    }
}

fn required<T>(value: Option<T>, (field, help): (&'static str, &str)) -> Result<T> {
    value.ok_or_else(|| invalid(field, format!("{help} is required")))
}

fn invalid(field: &'static str, message: String) -> AppError {
    AppError::Validation { field, message }
}
