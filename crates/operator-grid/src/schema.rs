// File: operator-grid/src/schema.rs
// Purpose: Static field schemas for each record kind

use crate::kind::RecordKind;

/// Single value or ordered list of values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    Scalar,
    Repeating,
}

/// Input control used in edit mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Hidden,
    Text,
    Tel,
}

impl InputType {
    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Hidden => "hidden",
            InputType::Text => "text",
            InputType::Tel => "tel",
        }
    }
}

/// Where a field's value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrigin {
    /// Typed by the operator
    Operator,
    /// Assigned by the server on create, hidden until saved
    ServerAssigned,
    /// Projection of server state, never edited
    ReadOnly,
}

/// How a stored value is shown in view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayFormat {
    Plain,
    /// Stored as bare digits, shown with a `+` prefix
    Phone,
    Timestamp,
    Flag,
}

/// Metadata for one field of a record kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub shape: FieldShape,
    pub input_type: InputType,
    pub required: bool,
    /// Key used in request and response bodies
    pub server_key: &'static str,
    /// Alternative keys accepted when hydrating list responses
    pub aliases: &'static [&'static str],
    pub origin: FieldOrigin,
    /// Part of the key set that identifies the server record on delete
    pub identity: bool,
    pub display: DisplayFormat,
    pub label_key: &'static str,
}

impl FieldSpec {
    const fn operator(
        name: &'static str,
        shape: FieldShape,
        input_type: InputType,
        display: DisplayFormat,
        label_key: &'static str,
    ) -> Self {
        Self {
            name,
            shape,
            input_type,
            required: true,
            server_key: name,
            aliases: &[],
            origin: FieldOrigin::Operator,
            identity: false,
            display,
            label_key,
        }
    }

    const fn read_only(name: &'static str, display: DisplayFormat, label_key: &'static str) -> Self {
        Self {
            name,
            shape: FieldShape::Scalar,
            input_type: InputType::Text,
            required: false,
            server_key: name,
            aliases: &[],
            origin: FieldOrigin::ReadOnly,
            identity: false,
            display,
            label_key,
        }
    }

    const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    const fn as_identity(mut self) -> Self {
        self.identity = true;
        self
    }

    pub fn is_repeating(&self) -> bool {
        self.shape == FieldShape::Repeating
    }

    /// Fields the operator types into (and that must pass the blank check)
    pub fn is_operator_input(&self) -> bool {
        self.origin == FieldOrigin::Operator
    }

    /// Keys to look up, in order, when reading a list row
    pub fn source_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.server_key).chain(self.aliases.iter().copied())
    }
}

/// Ordered field description of a record kind
#[derive(Debug, PartialEq, Eq)]
pub struct FieldSchema {
    pub kind: RecordKind,
    pub fields: &'static [FieldSpec],
}

impl FieldSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn operator_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.is_operator_input())
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.required)
    }

    pub fn identity_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.identity)
    }

    pub fn server_assigned(&self) -> Option<&FieldSpec> {
        self.fields
            .iter()
            .find(|f| f.origin == FieldOrigin::ServerAssigned)
    }

    /// Single-field kinds may be listed as bare strings
    pub fn single_field(&self) -> Option<&FieldSpec> {
        match self.fields {
            [only] => Some(only),
            _ => None,
        }
    }
}

static EMPLOYEE_SCHEMA: FieldSchema = FieldSchema {
    kind: RecordKind::Employee,
    fields: &[
        FieldSpec {
            name: "id",
            shape: FieldShape::Scalar,
            input_type: InputType::Hidden,
            required: false,
            server_key: "id",
            aliases: &[],
            origin: FieldOrigin::ServerAssigned,
            identity: true,
            display: DisplayFormat::Plain,
            label_key: "admin.tables.employee.id",
        },
        FieldSpec::operator(
            "lastname",
            FieldShape::Scalar,
            InputType::Text,
            DisplayFormat::Plain,
            "admin.tables.employee.lastname",
        ),
        FieldSpec::operator(
            "name",
            FieldShape::Scalar,
            InputType::Text,
            DisplayFormat::Plain,
            "admin.tables.employee.name",
        ),
        FieldSpec::operator(
            "phone",
            FieldShape::Repeating,
            InputType::Tel,
            DisplayFormat::Phone,
            "admin.tables.employee.phone",
        )
        .with_aliases(&["phones"]),
    ],
};

static BLACKLIST_SCHEMA: FieldSchema = FieldSchema {
    kind: RecordKind::Blacklist,
    fields: &[FieldSpec::operator(
        "phone",
        FieldShape::Scalar,
        InputType::Tel,
        DisplayFormat::Phone,
        "admin.tables.blacklist.phone",
    )
    .with_aliases(&["phone_number"])
    .as_identity()],
};

static WIFI_CLIENT_SCHEMA: FieldSchema = FieldSchema {
    kind: RecordKind::WifiClient,
    fields: &[
        FieldSpec::read_only("mac", DisplayFormat::Plain, "admin.tables.wifi_clients.mac")
            .as_identity(),
        FieldSpec::read_only(
            "expiration",
            DisplayFormat::Timestamp,
            "admin.tables.wifi_clients.expiration",
        ),
        FieldSpec::read_only(
            "employee",
            DisplayFormat::Flag,
            "admin.tables.wifi_clients.employee",
        ),
        FieldSpec::read_only("phone", DisplayFormat::Phone, "admin.tables.wifi_clients.phone"),
        FieldSpec::read_only("online", DisplayFormat::Flag, "admin.tables.wifi_clients.online"),
        FieldSpec::read_only(
            "last_location",
            DisplayFormat::Plain,
            "admin.tables.wifi_clients.last_location",
        ),
        FieldSpec::read_only(
            "last_ipv4_address",
            DisplayFormat::Plain,
            "admin.tables.wifi_clients.last_ipv4_address",
        ),
    ],
};

/// Field schema of a record kind
pub fn schema_for(kind: RecordKind) -> &'static FieldSchema {
    match kind {
        RecordKind::Employee => &EMPLOYEE_SCHEMA,
        RecordKind::Blacklist => &BLACKLIST_SCHEMA,
        RecordKind::WifiClient => &WIFI_CLIENT_SCHEMA,
    }
}
