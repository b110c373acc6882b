// 原始节点描述
//
// 调用方提供的未校验节点，字段任意。只在校验前短暂存在，
// 每一步处理都按值消费并返回新的描述。

use crate::error::NodeError;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDescriptor(Map<String, Value>);

impl RawDescriptor {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    // 设置字段（覆盖同名字段）
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    // 移除字段，返回移除后的描述和被移除的值
    pub fn take(mut self, key: &str) -> (Self, Option<Value>) {
        let value = self.0.remove(key);
        (self, value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RawDescriptor {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

impl TryFrom<Value> for RawDescriptor {
    type Error = NodeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            _ => Err(NodeError::NotAnObject),
        }
    }
}
