//! SNIP-12 타입 선언, 레지스트리 검증, 의존성 해석, 타입 문자열 인코딩

use super::super::poseidon::HashMethod;
use crate::errors::{StarknetError, StarknetResult};
use once_cell::sync::Lazy;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use tracing::trace;

/// 리비전 0 기본 타입
const LEGACY_BASIC_TYPES: &[&str] = &["felt", "bool", "string", "selector", "merkletree"];

/// 리비전 1 기본 타입
const ACTIVE_BASIC_TYPES: &[&str] = &[
    "felt",
    "bool",
    "string",
    "selector",
    "merkletree",
    "enum",
    "shortstring",
    "ContractAddress",
    "ClassHash",
    "timestamp",
    "u128",
    "i128",
];

/// 리비전 1 프리셋 타입 (재정의 불가)
static PRESET_TYPES: Lazy<TypeRegistry> = Lazy::new(|| {
    let mut presets = TypeRegistry::new();
    presets.insert(
        "u256",
        vec![
            TypeDeclaration::standard("low", "u128"),
            TypeDeclaration::standard("high", "u128"),
        ],
    );
    presets.insert(
        "TokenAmount",
        vec![
            TypeDeclaration::standard("token_address", "ContractAddress"),
            TypeDeclaration::standard("amount", "u256"),
        ],
    );
    presets.insert(
        "NftId",
        vec![
            TypeDeclaration::standard("collection_address", "ContractAddress"),
            TypeDeclaration::standard("token_id", "u256"),
        ],
    );
    presets
});

/// SNIP-12 리비전
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypedDataRevision {
    /// 리비전 0: Pedersen, `StarkNetDomain`
    #[default]
    Legacy,
    /// 리비전 1: Poseidon, `StarknetDomain`
    Active,
}

impl TypedDataRevision {
    /// 도메인 분리자 타입 이름
    pub fn domain_type(&self) -> &'static str {
        match self {
            TypedDataRevision::Legacy => "StarkNetDomain",
            TypedDataRevision::Active => "StarknetDomain",
        }
    }

    /// 구조체/배열 해시 방식
    pub fn hash_method(&self) -> HashMethod {
        match self {
            TypedDataRevision::Legacy => HashMethod::Pedersen,
            TypedDataRevision::Active => HashMethod::Poseidon,
        }
    }

    /// 기본 타입 여부
    pub fn is_basic_type(&self, type_name: &str) -> bool {
        match self {
            TypedDataRevision::Legacy => LEGACY_BASIC_TYPES.contains(&type_name),
            TypedDataRevision::Active => ACTIVE_BASIC_TYPES.contains(&type_name),
        }
    }

    /// 프리셋 타입 레지스트리 (리비전 1 전용)
    pub fn preset_types(&self) -> Option<&'static TypeRegistry> {
        match self {
            TypedDataRevision::Legacy => None,
            TypedDataRevision::Active => Some(&PRESET_TYPES),
        }
    }

    /// 프리셋 타입 여부
    pub fn is_preset_type(&self, type_name: &str) -> bool {
        self.preset_types()
            .is_some_and(|presets| presets.contains(type_name))
    }

    fn escape(&self, identifier: &str) -> String {
        match self {
            TypedDataRevision::Legacy => identifier.to_string(),
            TypedDataRevision::Active => format!("\"{identifier}\""),
        }
    }
}

/// 타입의 필드 선언
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTypeDeclaration", into = "RawTypeDeclaration")]
pub enum TypeDeclaration {
    /// 일반 필드 (`Name`, `Name*`, 리비전 1의 튜플 `(a,b)`)
    Standard { name: String, type_name: String },
    /// 열거형 필드 (`contains` 는 변형 목록 타입)
    Enum { name: String, contains: String },
    /// Merkle 트리 필드 (`contains` 는 리프 타입)
    MerkleTree { name: String, contains: String },
}

impl TypeDeclaration {
    pub fn standard(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        TypeDeclaration::Standard {
            name: name.into(),
            type_name: type_name.into(),
        }
    }

    pub fn enumeration(name: impl Into<String>, contains: impl Into<String>) -> Self {
        TypeDeclaration::Enum {
            name: name.into(),
            contains: contains.into(),
        }
    }

    pub fn merkle_tree(name: impl Into<String>, contains: impl Into<String>) -> Self {
        TypeDeclaration::MerkleTree {
            name: name.into(),
            contains: contains.into(),
        }
    }

    /// 필드 이름
    pub fn name(&self) -> &str {
        match self {
            TypeDeclaration::Standard { name, .. }
            | TypeDeclaration::Enum { name, .. }
            | TypeDeclaration::MerkleTree { name, .. } => name,
        }
    }

    /// 선언된 타입 이름 (`enum`, `merkletree` 포함)
    pub fn type_name(&self) -> &str {
        match self {
            TypeDeclaration::Standard { type_name, .. } => type_name,
            TypeDeclaration::Enum { .. } => "enum",
            TypeDeclaration::MerkleTree { .. } => "merkletree",
        }
    }

    /// `contains` 타입
    pub fn contains(&self) -> Option<&str> {
        match self {
            TypeDeclaration::Standard { .. } => None,
            TypeDeclaration::Enum { contains, .. } | TypeDeclaration::MerkleTree { contains, .. } => {
                Some(contains)
            },
        }
    }
}

/// JSON 형식의 필드 선언 `{ name, type, contains? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTypeDeclaration {
    name: String,
    #[serde(rename = "type")]
    type_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    contains: Option<String>,
}

impl TryFrom<RawTypeDeclaration> for TypeDeclaration {
    type Error = StarknetError;

    fn try_from(raw: RawTypeDeclaration) -> Result<Self, Self::Error> {
        match (raw.type_name.as_str(), raw.contains) {
            ("enum", Some(contains)) => Ok(TypeDeclaration::Enum {
                name: raw.name,
                contains,
            }),
            ("merkletree", Some(contains)) => Ok(TypeDeclaration::MerkleTree {
                name: raw.name,
                contains,
            }),
            ("enum", None) | ("merkletree", None) => Err(StarknetError::InvalidContainsType {
                field: raw.name,
                message: format!("'{}' field requires a contains type", raw.type_name),
            }),
            (_, _) => Ok(TypeDeclaration::Standard {
                name: raw.name,
                type_name: raw.type_name,
            }),
        }
    }
}

impl From<TypeDeclaration> for RawTypeDeclaration {
    fn from(declaration: TypeDeclaration) -> Self {
        let type_name = declaration.type_name().to_string();
        match declaration {
            TypeDeclaration::Standard { name, .. } => RawTypeDeclaration {
                name,
                type_name,
                contains: None,
            },
            TypeDeclaration::Enum { name, contains }
            | TypeDeclaration::MerkleTree { name, contains } => RawTypeDeclaration {
                name,
                type_name,
                contains: Some(contains),
            },
        }
    }
}

/// 삽입 순서를 보존하는 타입 레지스트리
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRegistry {
    entries: Vec<(String, Vec<TypeDeclaration>)>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 타입 추가 (같은 이름은 교체)
    pub fn insert(&mut self, name: impl Into<String>, fields: Vec<TypeDeclaration>) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = fields,
            None => self.entries.push((name, fields)),
        }
    }

    /// 빌더 형식 추가
    pub fn with_type(mut self, name: impl Into<String>, fields: Vec<TypeDeclaration>) -> Self {
        self.insert(name, fields);
        self
    }

    pub fn get(&self, name: &str) -> Option<&[TypeDeclaration]> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, fields)| fields.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TypeDeclaration])> {
        self.entries
            .iter()
            .map(|(name, fields)| (name.as_str(), fields.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for TypeRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, fields) in &self.entries {
            map.serialize_entry(name, fields)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TypeRegistry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RegistryVisitor;

        impl<'de> Visitor<'de> for RegistryVisitor {
            type Value = TypeRegistry;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of type names to field declarations")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut registry = TypeRegistry::new();
                while let Some((name, fields)) =
                    access.next_entry::<String, Vec<TypeDeclaration>>()?
                {
                    registry.insert(name, fields);
                }
                Ok(registry)
            }
        }

        deserializer.deserialize_map(RegistryVisitor)
    }
}

/// 선언 타입 또는 (리비전 1) 프리셋 타입의 필드 목록
pub(crate) fn resolve_type<'a>(
    types: &'a TypeRegistry,
    revision: TypedDataRevision,
    type_name: &str,
) -> Option<&'a [TypeDeclaration]> {
    types.get(type_name).or_else(|| {
        revision
            .preset_types()
            .and_then(|presets| presets.get(type_name))
    })
}

/// `(a,b*)` 형식의 튜플 타입 여부
pub(crate) fn is_tuple_type(type_name: &str) -> bool {
    type_name.starts_with('(') && type_name.ends_with(')')
}

/// 튜플 타입의 원소 타입들 (`()` 는 빈 목록)
pub(crate) fn tuple_members(type_name: &str) -> Vec<&str> {
    let inner = &type_name[1..type_name.len() - 1];
    inner.split(',').filter(|member| !member.is_empty()).collect()
}

pub(crate) fn strip_array(type_name: &str) -> &str {
    type_name.strip_suffix('*').unwrap_or(type_name)
}

/// 필드 선언이 참조하는 타입 이름들
fn referenced_types(
    declaration: &TypeDeclaration,
    revision: TypedDataRevision,
    follow_merkle_tree: bool,
) -> Vec<&str> {
    match declaration {
        TypeDeclaration::Standard { type_name, .. } => {
            if revision == TypedDataRevision::Active && is_tuple_type(type_name) {
                tuple_members(type_name).into_iter().map(strip_array).collect()
            } else {
                vec![strip_array(type_name)]
            }
        },
        TypeDeclaration::Enum { contains, .. } => vec![contains.as_str()],
        TypeDeclaration::MerkleTree { contains, .. } => {
            if follow_merkle_tree {
                vec![strip_array(contains)]
            } else {
                vec![]
            }
        },
    }
}

fn walk_dependencies(
    types: &TypeRegistry,
    revision: TypedDataRevision,
    root: &str,
    follow_merkle_tree: bool,
) -> Vec<String> {
    if resolve_type(types, revision, root).is_none() {
        return Vec::new();
    }

    let mut dependencies = vec![root.to_string()];
    let mut queue = VecDeque::from([root.to_string()]);

    while let Some(current) = queue.pop_front() {
        let Some(fields) = resolve_type(types, revision, &current) else {
            continue;
        };
        for declaration in fields {
            for referenced in referenced_types(declaration, revision, follow_merkle_tree) {
                if resolve_type(types, revision, referenced).is_some()
                    && !dependencies.iter().any(|known| known == referenced)
                {
                    dependencies.push(referenced.to_string());
                    queue.push_back(referenced.to_string());
                }
            }
        }
    }

    dependencies[1..].sort();
    dependencies
}

/// 타입의 의존성 목록
///
/// 루트 타입이 먼저 오고, 나머지는 사전순으로 정렬됩니다. 알 수 없는 타입은 빈 목록을 돌려줍니다.
pub fn get_dependencies(
    types: &TypeRegistry,
    revision: TypedDataRevision,
    type_name: &str,
) -> Vec<String> {
    let dependencies = walk_dependencies(types, revision, type_name, false);
    trace!(type_name, ?dependencies, "resolved type dependencies");
    dependencies
}

/// 타입 인코딩 문자열 생성
///
/// 리비전 0: `Mail(from:Person,to:Person,contents:felt)Person(name:felt,wallet:felt)`
/// 리비전 1: 모든 식별자를 큰따옴표로 감싸고, 튜플 타입은 `("u128","felt")` 형식으로 씁니다.
pub fn encode_type(
    types: &TypeRegistry,
    revision: TypedDataRevision,
    type_name: &str,
) -> StarknetResult<String> {
    let dependencies = get_dependencies(types, revision, type_name);
    if dependencies.is_empty() {
        return Err(StarknetError::UnresolvedType {
            type_name: type_name.to_string(),
        });
    }

    let mut encoded = String::new();
    for dependency in &dependencies {
        let fields = resolve_type(types, revision, dependency).ok_or_else(|| {
            StarknetError::UnresolvedType {
                type_name: dependency.clone(),
            }
        })?;

        let rendered: Vec<String> = fields
            .iter()
            .map(|field| {
                let target = match (field, revision) {
                    (TypeDeclaration::Enum { contains, .. }, TypedDataRevision::Active) => {
                        contains.as_str()
                    },
                    _ => field.type_name(),
                };
                let type_string = if is_tuple_type(target) {
                    let members: Vec<String> = target[1..target.len() - 1]
                        .split(',')
                        .map(|member| {
                            if member.is_empty() {
                                String::new()
                            } else {
                                revision.escape(member)
                            }
                        })
                        .collect();
                    format!("({})", members.join(","))
                } else {
                    revision.escape(target)
                };
                format!("{}:{}", revision.escape(field.name()), type_string)
            })
            .collect();

        encoded.push_str(&format!(
            "{}({})",
            revision.escape(dependency),
            rendered.join(",")
        ));
    }

    Ok(encoded)
}

fn is_resolvable(types: &TypeRegistry, revision: TypedDataRevision, type_name: &str) -> bool {
    revision.is_basic_type(type_name) || resolve_type(types, revision, type_name).is_some()
}

fn unresolved(type_name: &str) -> StarknetError {
    StarknetError::UnresolvedType {
        type_name: type_name.to_string(),
    }
}

fn validate_declaration(
    types: &TypeRegistry,
    revision: TypedDataRevision,
    declaration: &TypeDeclaration,
    is_variant_list: bool,
) -> StarknetResult<()> {
    match declaration {
        TypeDeclaration::Standard { type_name, .. } => {
            let members = if revision == TypedDataRevision::Active
                && is_variant_list
                && is_tuple_type(type_name)
            {
                tuple_members(type_name)
            } else {
                vec![type_name.as_str()]
            };
            for member in members {
                let base = strip_array(member);
                if !is_resolvable(types, revision, base) {
                    return Err(unresolved(base));
                }
            }
            Ok(())
        },
        TypeDeclaration::Enum { contains, .. } => {
            if revision != TypedDataRevision::Active {
                return Err(unresolved("enum"));
            }
            if !types.contains(contains) {
                return Err(unresolved(contains));
            }
            Ok(())
        },
        TypeDeclaration::MerkleTree { name, contains } => {
            if contains.ends_with('*') {
                return Err(StarknetError::InvalidContainsType {
                    field: name.clone(),
                    message: format!("Merkle tree contains type must not be an array: {contains}"),
                });
            }
            if !is_resolvable(types, revision, contains) {
                return Err(unresolved(contains));
            }
            Ok(())
        },
    }
}

/// 타입 레지스트리 검증
///
/// 기본/프리셋 타입 재정의, 잘못된 타입 이름, 미해결 참조, 도메인 타입 누락,
/// 주 타입과 도메인 타입 어느 쪽에서도 도달할 수 없는 타입을 거부합니다.
pub fn validate_types(
    types: &TypeRegistry,
    revision: TypedDataRevision,
    primary_type: &str,
) -> StarknetResult<()> {
    for (name, _) in types.iter() {
        if name.is_empty()
            || name.ends_with('*')
            || is_tuple_type(name)
            || name.contains(',')
        {
            return Err(StarknetError::InvalidTypeName {
                type_name: name.to_string(),
            });
        }
        if revision.is_basic_type(name) {
            return Err(StarknetError::BasicTypeRedefinition {
                type_name: name.to_string(),
            });
        }
        if revision.is_preset_type(name) {
            return Err(StarknetError::PresetTypeRedefinition {
                type_name: name.to_string(),
            });
        }
    }

    let domain_type = revision.domain_type();
    if !types.contains(domain_type) {
        return Err(StarknetError::MissingDomainType {
            domain_type: domain_type.to_string(),
        });
    }

    if resolve_type(types, revision, primary_type).is_none() {
        return Err(unresolved(primary_type));
    }

    // 튜플 타입은 열거형 변형 목록 안에서만 허용
    let variant_lists: HashSet<&str> = types
        .iter()
        .flat_map(|(_, fields)| fields.iter())
        .filter_map(|declaration| match declaration {
            TypeDeclaration::Enum { contains, .. } => Some(contains.as_str()),
            _ => None,
        })
        .collect();

    for (name, fields) in types.iter() {
        let is_variant_list = variant_lists.contains(name);
        for declaration in fields {
            validate_declaration(types, revision, declaration, is_variant_list)?;
        }
    }

    let reachable: HashSet<String> = walk_dependencies(types, revision, primary_type, true)
        .into_iter()
        .chain(walk_dependencies(types, revision, domain_type, true))
        .collect();

    for (name, _) in types.iter() {
        if !reachable.contains(name) {
            return Err(StarknetError::DanglingType {
                type_name: name.to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail_types() -> TypeRegistry {
        TypeRegistry::new()
            .with_type(
                "StarkNetDomain",
                vec![
                    TypeDeclaration::standard("name", "felt"),
                    TypeDeclaration::standard("version", "felt"),
                    TypeDeclaration::standard("chainId", "felt"),
                ],
            )
            .with_type(
                "Person",
                vec![
                    TypeDeclaration::standard("name", "felt"),
                    TypeDeclaration::standard("wallet", "felt"),
                ],
            )
            .with_type(
                "Mail",
                vec![
                    TypeDeclaration::standard("from", "Person"),
                    TypeDeclaration::standard("to", "Person"),
                    TypeDeclaration::standard("contents", "felt"),
                ],
            )
    }

    #[test]
    fn test_declaration_serde() {
        let json = serde_json::json!([
            { "name": "a", "type": "felt" },
            { "name": "b", "type": "enum", "contains": "Choice" },
            { "name": "c", "type": "merkletree", "contains": "Leaf" }
        ]);
        let fields: Vec<TypeDeclaration> = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(fields[0], TypeDeclaration::standard("a", "felt"));
        assert_eq!(fields[1], TypeDeclaration::enumeration("b", "Choice"));
        assert_eq!(fields[2], TypeDeclaration::merkle_tree("c", "Leaf"));
        assert_eq!(serde_json::to_value(&fields).unwrap(), json);

        let missing: Result<Vec<TypeDeclaration>, _> =
            serde_json::from_value(serde_json::json!([{ "name": "m", "type": "merkletree" }]));
        assert!(missing.is_err());
    }

    #[test]
    fn test_registry_preserves_order() {
        let json = r#"{ "Zeta": [], "Alpha": [], "Mid": [] }"#;
        let registry: TypeRegistry = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = registry.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_dependencies_root_first_then_sorted() {
        let types = mail_types();
        let deps = get_dependencies(&types, TypedDataRevision::Legacy, "Mail");
        assert_eq!(deps, vec!["Mail".to_string(), "Person".to_string()]);

        assert!(get_dependencies(&types, TypedDataRevision::Legacy, "Unknown").is_empty());
    }

    #[test]
    fn test_encode_type_legacy() {
        let types = mail_types();
        assert_eq!(
            encode_type(&types, TypedDataRevision::Legacy, "Mail").unwrap(),
            "Mail(from:Person,to:Person,contents:felt)Person(name:felt,wallet:felt)"
        );
    }

    #[test]
    fn test_encode_type_active_enum_and_presets() {
        let types = TypeRegistry::new()
            .with_type(
                "Example",
                vec![
                    TypeDeclaration::enumeration("someEnum", "MyEnum"),
                    TypeDeclaration::standard("amount", "u256"),
                ],
            )
            .with_type(
                "MyEnum",
                vec![
                    TypeDeclaration::standard("Variant 1", "()"),
                    TypeDeclaration::standard("Variant 2", "(u128,u128*)"),
                ],
            );

        assert_eq!(
            encode_type(&types, TypedDataRevision::Active, "Example").unwrap(),
            concat!(
                r#""Example"("someEnum":"MyEnum","amount":"u256")"#,
                r#""MyEnum"("Variant 1":(),"Variant 2":("u128","u128*"))"#,
                r#""u256"("low":"u128","high":"u128")"#
            )
        );
    }

    #[test]
    fn test_tuple_outside_enum_rejected() {
        let types = TypeRegistry::new()
            .with_type("StarknetDomain", vec![TypeDeclaration::standard("name", "shortstring")])
            .with_type("Pair", vec![TypeDeclaration::standard("values", "(u128,felt)")]);
        let err = validate_types(&types, TypedDataRevision::Active, "Pair").unwrap_err();
        assert_eq!(err.code(), "UNRESOLVED_TYPE");
    }

    #[test]
    fn test_validate_ok() {
        assert!(validate_types(&mail_types(), TypedDataRevision::Legacy, "Mail").is_ok());
    }

    #[test]
    fn test_validate_basic_redefinition() {
        let types = mail_types().with_type("felt", vec![]);
        let err = validate_types(&types, TypedDataRevision::Legacy, "Mail").unwrap_err();
        assert_eq!(err.code(), "BASIC_TYPE_REDEFINITION");
    }

    #[test]
    fn test_validate_preset_redefinition_only_in_active() {
        let types = TypeRegistry::new()
            .with_type("StarknetDomain", vec![TypeDeclaration::standard("name", "shortstring")])
            .with_type("u256", vec![]);
        let err = validate_types(&types, TypedDataRevision::Active, "StarknetDomain").unwrap_err();
        assert_eq!(err.code(), "PRESET_TYPE_REDEFINITION");
    }

    #[test]
    fn test_validate_invalid_names() {
        for bad in ["", "Mail*", "(Mail)", "Ma,il"] {
            let types = mail_types().with_type(bad, vec![]);
            let err = validate_types(&types, TypedDataRevision::Legacy, "Mail").unwrap_err();
            assert_eq!(err.code(), "INVALID_TYPE_NAME", "{bad}");
        }
    }

    #[test]
    fn test_validate_dangling() {
        let types = mail_types().with_type("Orphan", vec![TypeDeclaration::standard("x", "felt")]);
        let err = validate_types(&types, TypedDataRevision::Legacy, "Mail").unwrap_err();
        assert_eq!(
            err,
            StarknetError::DanglingType {
                type_name: "Orphan".into()
            }
        );
    }

    #[test]
    fn test_validate_missing_domain() {
        let types = mail_types();
        let err = validate_types(&types, TypedDataRevision::Active, "Mail").unwrap_err();
        assert_eq!(err.code(), "MISSING_DOMAIN_TYPE");
    }

    #[test]
    fn test_revision_isolation() {
        let types = mail_types().with_type(
            "Mail",
            vec![
                TypeDeclaration::standard("from", "Person"),
                TypeDeclaration::standard("to", "Person"),
                TypeDeclaration::standard("amount", "u128"),
            ],
        );
        let err = validate_types(&types, TypedDataRevision::Legacy, "Mail").unwrap_err();
        assert_eq!(
            err,
            StarknetError::UnresolvedType {
                type_name: "u128".into()
            }
        );

        let types = mail_types().with_type(
            "Mail",
            vec![
                TypeDeclaration::standard("from", "Person"),
                TypeDeclaration::standard("to", "Person"),
                TypeDeclaration::standard("amount", "u256"),
            ],
        );
        assert!(validate_types(&types, TypedDataRevision::Legacy, "Mail").is_err());
    }

    #[test]
    fn test_merkle_contains_is_reachable() {
        let types = TypeRegistry::new()
            .with_type("StarkNetDomain", vec![TypeDeclaration::standard("name", "felt")])
            .with_type("Session", vec![TypeDeclaration::merkle_tree("root", "Policy")])
            .with_type("Policy", vec![TypeDeclaration::standard("contract", "felt")]);
        assert!(validate_types(&types, TypedDataRevision::Legacy, "Session").is_ok());

        // 리프 타입은 타입 문자열에 포함되지 않음
        assert_eq!(
            encode_type(&types, TypedDataRevision::Legacy, "Session").unwrap(),
            "Session(root:merkletree)"
        );
    }

    #[test]
    fn test_merkle_contains_array_rejected() {
        let types = TypeRegistry::new()
            .with_type("StarkNetDomain", vec![TypeDeclaration::standard("name", "felt")])
            .with_type("Session", vec![TypeDeclaration::merkle_tree("root", "felt*")]);
        let err = validate_types(&types, TypedDataRevision::Legacy, "Session").unwrap_err();
        assert_eq!(err.code(), "INVALID_CONTAINS_TYPE");
    }
}
