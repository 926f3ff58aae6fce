//! Form descriptor emission - renders a resolved object schema as a tree of
//! UI control descriptors.
//!
//! The output is pure data: control kinds, attached checks, initial values,
//! option lists, and child controls. No templating or widget toolkit is
//! assumed; downstream writers map each kind onto their component library.

use serde::Serialize;
use serde_json::Value;

use crate::config::BooleanControl;
use crate::discovery::initial_value;
use crate::naming::title_case;
use crate::resolver::{EnumMember, PropertyDescriptor, ResolveContext, TypeDescriptor, TypeKind};
use crate::schema::StringFormat;

/// Controls with more than this many choices render as a searchable select
/// instead of a flat choice group.
const CHOICE_GROUP_LIMIT: usize = 4;

/// What widget a control renders as. Decided once, from the descriptor shape;
/// first matching rule wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlKind {
    /// Flat group of mutually exclusive choices (small enums).
    ChoiceGroup,
    /// Searchable single-select (larger enums).
    Select,
    Toggle,
    Checkbox,
    /// Bounded numeric input with both ends declared.
    Slider,
    NumberField,
    DatePicker,
    /// Obscured input for password-hinted strings.
    MaskedField,
    MultilineField,
    FilePicker,
    /// Multi-choice toggle group over a closed string set.
    CheckboxGroup,
    /// Free-entry list of short string values.
    ChipList,
    /// Repeatable sub-form with add/remove rows.
    SubFormArray,
    /// Nested group of child controls.
    SubGroup,
    /// Type selector plus one sub-group per variant.
    Discriminated,
    TextField,
}

/// One selectable choice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceOption {
    pub label: String,
    pub value: Value,
}

/// A check attached to one control. Inclusive bounds and lengths have
/// built-in equivalents in common form toolkits; everything else ships as a
/// named custom rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "kebab-case")]
pub enum UiValidator {
    Required,
    Min { value: f64 },
    Max { value: f64 },
    MinLength { value: u64 },
    MaxLength { value: u64 },
    Pattern { pattern: String },
    #[serde(rename_all = "camelCase")]
    Custom { name: String, argument: Value },
}

impl UiValidator {
    /// Whether the rule maps onto a stock form-toolkit validator.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, UiValidator::Custom { .. })
    }
}

/// One node of the emitted control tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormControlDescriptor {
    pub name: String,
    pub label: String,
    pub kind: ControlKind,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<UiValidator>,
    pub initial: Value,
    /// Shown but never editable.
    pub read_only: bool,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceOption>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FormControlDescriptor>,
}

impl FormControlDescriptor {
    fn leaf(name: &str, kind: ControlKind) -> FormControlDescriptor {
        FormControlDescriptor {
            name: name.to_string(),
            label: title_case(name),
            kind,
            validators: Vec::new(),
            initial: Value::Null,
            read_only: false,
            enabled: true,
            options: Vec::new(),
            children: Vec::new(),
        }
    }

    /// For a discriminated control: enable the named variant's sub-group and
    /// disable every sibling, clearing their values. The selector child keeps
    /// the chosen name as its value.
    pub fn select_variant(&mut self, variant: &str) {
        if self.kind != ControlKind::Discriminated {
            return;
        }
        for child in &mut self.children {
            if child.kind == ControlKind::SubGroup {
                if child.name == variant {
                    child.enabled = true;
                } else {
                    child.enabled = false;
                    child.initial = Value::Null;
                }
            } else {
                // The type selector.
                child.initial = Value::String(variant.to_string());
            }
        }
    }

    /// The currently enabled variant sub-group, if this is a discriminated
    /// control with a selection.
    pub fn selected_variant(&self) -> Option<&str> {
        if self.kind != ControlKind::Discriminated {
            return None;
        }
        self.children
            .iter()
            .find(|c| c.kind == ControlKind::SubGroup && c.enabled)
            .map(|c| c.name.as_str())
    }
}

/// Build the control tree for an ordered property list. The root is a group
/// holding one control per property.
pub fn build_form(
    ctx: &ResolveContext<'_>,
    properties: &[PropertyDescriptor],
) -> FormControlDescriptor {
    let mut root = FormControlDescriptor::leaf("root", ControlKind::SubGroup);
    root.label = String::new();
    root.children = properties
        .iter()
        .map(|prop| build_control(ctx, prop))
        .collect();
    root
}

/// Build one control for one property.
pub fn build_control(
    ctx: &ResolveContext<'_>,
    prop: &PropertyDescriptor,
) -> FormControlDescriptor {
    let descriptor = ctx.dereference(&prop.descriptor);
    let mut control = FormControlDescriptor::leaf(&prop.name, ControlKind::TextField);
    control.read_only = prop.read_only;
    control.enabled = !prop.read_only;
    control.initial = initial_value(ctx, prop);
    control.validators = ui_validators(prop, descriptor);

    control.kind = match &descriptor.kind {
        TypeKind::StringEnum(literals) => {
            control.options = string_options(literals);
            choice_kind(literals.len())
        }
        TypeKind::Enumeration { members, .. } => {
            control.options = member_options(members);
            choice_kind(members.len())
        }
        TypeKind::Boolean => match ctx.options().boolean_control {
            BooleanControl::Toggle => ControlKind::Toggle,
            BooleanControl::Checkbox => ControlKind::Checkbox,
        },
        TypeKind::Integer | TypeKind::Number => {
            let number = &descriptor.constraints.number;
            if number.minimum.is_some() && number.maximum.is_some() {
                ControlKind::Slider
            } else {
                ControlKind::NumberField
            }
        }
        TypeKind::Date | TypeKind::DateTime => ControlKind::DatePicker,
        TypeKind::String => match descriptor.format {
            Some(StringFormat::Date) | Some(StringFormat::DateTime) => ControlKind::DatePicker,
            Some(StringFormat::Password) => ControlKind::MaskedField,
            Some(StringFormat::Multiline) => ControlKind::MultilineField,
            Some(StringFormat::Binary) | Some(StringFormat::Byte) => ControlKind::FilePicker,
            None => ControlKind::TextField,
        },
        TypeKind::Binary => ControlKind::FilePicker,
        TypeKind::Array(element) => {
            let element = ctx.dereference(element);
            match &element.kind {
                TypeKind::StringEnum(literals) => {
                    control.options = string_options(literals);
                    ControlKind::CheckboxGroup
                }
                TypeKind::Enumeration { members, .. } => {
                    control.options = member_options(members);
                    ControlKind::CheckboxGroup
                }
                TypeKind::String => ControlKind::ChipList,
                TypeKind::Object(element_properties) => {
                    control.children = element_properties
                        .iter()
                        .map(|p| build_control(ctx, p))
                        .collect();
                    ControlKind::SubFormArray
                }
                _ => ControlKind::ChipList,
            }
        }
        TypeKind::Object(object_properties) => {
            control.children = object_properties
                .iter()
                .map(|p| build_control(ctx, p))
                .collect();
            ControlKind::SubGroup
        }
        TypeKind::Union(members) => match discriminated_children(ctx, prop, members) {
            Some(children) => {
                control.children = children;
                ControlKind::Discriminated
            }
            None => ControlKind::TextField,
        },
        _ => ControlKind::TextField,
    };
    control
}

fn choice_kind(cardinality: usize) -> ControlKind {
    if cardinality <= CHOICE_GROUP_LIMIT {
        ControlKind::ChoiceGroup
    } else {
        ControlKind::Select
    }
}

fn string_options(literals: &[String]) -> Vec<ChoiceOption> {
    literals
        .iter()
        .map(|literal| ChoiceOption {
            label: title_case(literal),
            value: Value::String(literal.clone()),
        })
        .collect()
}

fn member_options(members: &[EnumMember]) -> Vec<ChoiceOption> {
    members
        .iter()
        .map(|member| ChoiceOption {
            label: title_case(&member.name),
            value: member.value.clone(),
        })
        .collect()
}

/// A union qualifies for a discriminated sub-form only when every member is
/// a named object schema. The result is one type selector followed by one
/// sub-group per variant, all variants disabled until selected.
fn discriminated_children(
    ctx: &ResolveContext<'_>,
    prop: &PropertyDescriptor,
    members: &[TypeDescriptor],
) -> Option<Vec<FormControlDescriptor>> {
    let mut variants = Vec::new();
    for member in members {
        let name = match &member.kind {
            TypeKind::Named(name) => name.clone(),
            _ => return None,
        };
        let properties = match &ctx.dereference(member).kind {
            TypeKind::Object(properties) => properties.clone(),
            _ => return None,
        };
        variants.push((name, properties));
    }
    if variants.is_empty() {
        return None;
    }

    let mut selector = FormControlDescriptor::leaf(
        &format!("{}Type", prop.name),
        choice_kind(variants.len()),
    );
    selector.options = variants
        .iter()
        .map(|(name, _)| ChoiceOption {
            label: title_case(name),
            value: Value::String(name.clone()),
        })
        .collect();
    if prop.required {
        selector.validators.push(UiValidator::Required);
    }

    let mut children = vec![selector];
    for (name, properties) in &variants {
        let mut group = FormControlDescriptor::leaf(name, ControlKind::SubGroup);
        group.enabled = false;
        group.children = properties.iter().map(|p| build_control(ctx, p)).collect();
        children.push(group);
    }
    Some(children)
}

/// UI-level checks for one property. Inclusive bounds and lengths use the
/// built-in rules; exclusive bounds, multiples, and uniqueness have no
/// built-in equivalent and ship as named custom rules.
fn ui_validators(prop: &PropertyDescriptor, descriptor: &TypeDescriptor) -> Vec<UiValidator> {
    let mut checks = Vec::new();
    if prop.required && !prop.read_only {
        checks.push(UiValidator::Required);
    }

    let number = &descriptor.constraints.number;
    if let Some(minimum) = number.minimum {
        if number.exclusive_minimum {
            checks.push(UiValidator::Custom {
                name: "exclusive-min".to_string(),
                argument: Value::from(minimum),
            });
        } else {
            checks.push(UiValidator::Min { value: minimum });
        }
    }
    if let Some(maximum) = number.maximum {
        if number.exclusive_maximum {
            checks.push(UiValidator::Custom {
                name: "exclusive-max".to_string(),
                argument: Value::from(maximum),
            });
        } else {
            checks.push(UiValidator::Max { value: maximum });
        }
    }
    if let Some(multiple) = number.multiple_of {
        checks.push(UiValidator::Custom {
            name: "multiple-of".to_string(),
            argument: Value::from(multiple),
        });
    }

    let string = &descriptor.constraints.string;
    if let Some(min) = string.min_length {
        checks.push(UiValidator::MinLength { value: min });
    }
    if let Some(max) = string.max_length {
        checks.push(UiValidator::MaxLength { value: max });
    }
    if let Some(pattern) = &string.pattern {
        checks.push(UiValidator::Pattern {
            pattern: pattern.clone(),
        });
    }

    let array = &descriptor.constraints.array;
    if let Some(min) = array.min_items {
        checks.push(UiValidator::MinLength { value: min });
    }
    if let Some(max) = array.max_items {
        checks.push(UiValidator::MaxLength { value: max });
    }
    if array.unique_items {
        checks.push(UiValidator::Custom {
            name: "unique-items".to_string(),
            argument: Value::Null,
        });
    }
    checks
}
