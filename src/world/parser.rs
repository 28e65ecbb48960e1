use crate::coords::Coordinate;
use crate::error::{BotError, Result};
use serde_json::Value;

/// What a `gameobjects` entry describes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    LivingAnt,
    DeadAnt,
    Wall,
    Food,
    Hill,
}

impl ObjectKind {
    /// Case-insensitive type code; `None` for codes this bot does not track
    pub fn from_code(code: &str) -> Option<Self> {
        match code.as_bytes() {
            // "B" is a living ant that carries food
            [b'a' | b'A'] | [b'b' | b'B'] => Some(ObjectKind::LivingAnt),
            [b'd' | b'D'] | [b'x' | b'X'] => Some(ObjectKind::DeadAnt),
            [b'w' | b'W'] => Some(ObjectKind::Wall),
            [b'f' | b'F'] => Some(ObjectKind::Food),
            [b'h' | b'H'] => Some(ObjectKind::Hill),
            _ => None,
        }
    }

    /// Ants and hills carry an owner id
    #[inline]
    pub fn has_owner(self) -> bool {
        matches!(
            self,
            ObjectKind::LivingAnt | ObjectKind::DeadAnt | ObjectKind::Hill
        )
    }
}

/// One decoded `(code, row, col, owner?)` tuple
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameObject {
    pub kind: ObjectKind,
    pub pos: Coordinate,
    /// 0 is ours
    pub owner: Option<i64>,
}

impl GameObject {
    #[inline]
    pub fn is_mine(&self) -> bool {
        self.owner == Some(0)
    }
}

/// Decode one entry; `Ok(None)` for an unknown type code
pub fn parse_object(value: &Value) -> Result<Option<GameObject>> {
    let fields = value
        .as_array()
        .ok_or_else(|| BotError::Malformed(format!("game object is not an array: {}", value)))?;

    let code = fields
        .first()
        .and_then(Value::as_str)
        .ok_or_else(|| BotError::Malformed(format!("game object without type code: {}", value)))?;
    let Some(kind) = ObjectKind::from_code(code) else {
        return Ok(None);
    };

    let row = int_field(fields, 1, "row", value)?;
    let col = int_field(fields, 2, "col", value)?;
    let owner = match fields.get(3) {
        Some(v) => Some(v.as_i64().ok_or_else(|| {
            BotError::Malformed(format!("game object owner is not an integer: {}", value))
        })?),
        None if kind.has_owner() => {
            return Err(BotError::Malformed(format!(
                "game object without owner: {}",
                value
            )))
        }
        None => None,
    };

    Ok(Some(GameObject {
        kind,
        pos: Coordinate::new(col, row),
        owner,
    }))
}

/// Decode a whole `gameobjects` list, failing on the first malformed entry
pub fn parse_objects(values: &[Value]) -> Result<Vec<GameObject>> {
    let mut objects = Vec::with_capacity(values.len());
    for value in values {
        if let Some(obj) = parse_object(value)? {
            objects.push(obj);
        }
    }
    Ok(objects)
}

fn int_field(fields: &[Value], idx: usize, name: &str, whole: &Value) -> Result<i32> {
    fields
        .get(idx)
        .and_then(Value::as_i64)
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| BotError::Malformed(format!("game object {} is not an integer: {}", name, whole)))
}
