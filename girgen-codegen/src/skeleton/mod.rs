//! Skeleton synthesizer.
//!
//! Emits one minimal Swift declaration per IR entry. The output is enough to
//! see which declarations ended up in which file; it makes no attempt at
//! faithful type mapping or ownership handling.

mod builder;
mod types;

pub use builder::SwiftBuilder;
pub use types::{fundamental, qualified_name, string_literal, swift_type};

use girgen_core::to_camel_case;
use girgen_ir::{DeclKind, Declaration, Field, Member, Signature};

use crate::{GenerationContext, Synthesizer};

/// Synthesizer producing Swift skeleton declarations.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkeletonSynthesizer;

impl Synthesizer for SkeletonSynthesizer {
    fn synthesize(&self, decl: &Declaration, ctx: &GenerationContext) -> String {
        let name = decl.display_name();
        let code = SwiftBuilder::new().when(decl.c_type.is_some(), |b| {
            b.doc(&format!("Wraps `{}`.", decl.c_type.as_deref().unwrap_or_default()))
        });
        let code = match &decl.kind {
            DeclKind::Alias { target } => {
                code.line(&format!("public typealias {name} = {}", swift_type(target, ctx)))
            }
            DeclKind::Callback { signature } => code.line(&format!(
                "public typealias {name} = ({}) -> {}",
                signature
                    .params
                    .iter()
                    .map(|p| swift_type(&p.type_name, ctx))
                    .collect::<Vec<_>>()
                    .join(", "),
                return_type(signature, ctx),
            )),
            DeclKind::Constant { type_name, value } => {
                code.line(&constant(&decl.name, type_name, value, ctx))
            }
            DeclKind::Enumeration { members } => {
                code.block(&format!("public enum {name}: Int {{"), "}", |b| {
                    b.each(members, |b, m: &Member| {
                        b.line(&format!("case {} = {}", to_camel_case(&m.name), m.value))
                    })
                })
            }
            DeclKind::Bitfield { members } => {
                code.block(&format!("public struct {name}: OptionSet {{"), "}", |b| {
                    b.line("public let rawValue: Int")
                        .line("public init(rawValue: Int) { self.rawValue = rawValue }")
                        .each(members, |b, m: &Member| {
                            b.line(&format!(
                                "public static let {} = {name}(rawValue: {})",
                                to_camel_case(&m.name),
                                m.value
                            ))
                        })
                })
            }
            DeclKind::Union { fields } | DeclKind::Record { fields } => {
                code.block(&format!("public struct {name} {{"), "}", |b| {
                    stored_properties(b, fields, ctx)
                })
            }
            DeclKind::Interface { prerequisites } if prerequisites.is_empty() => {
                code.line(&format!("public protocol {name} {{}}"))
            }
            DeclKind::Interface { prerequisites } => code.line(&format!(
                "public protocol {name}: {} {{}}",
                prerequisites
                    .iter()
                    .map(|p| qualified_name(p, ctx))
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            DeclKind::Class { parent, fields } => {
                let header = match parent {
                    Some(parent) => format!("open class {name}: {} {{", qualified_name(parent, ctx)),
                    None => format!("open class {name} {{"),
                };
                code.block(&header, "}", |b| stored_properties(b, fields, ctx))
            }
            DeclKind::Function { signature } => function(decl, signature, ctx, code),
        };
        code.build()
    }
}

fn return_type(signature: &Signature, ctx: &GenerationContext) -> String {
    signature
        .returns
        .as_deref()
        .map(|r| swift_type(r, ctx))
        .unwrap_or_else(|| "Void".to_string())
}

fn constant(name: &str, type_name: &str, value: &str, ctx: &GenerationContext) -> String {
    if ctx.filters().is_verbatim(name) {
        return format!("public let {name} = {value}");
    }
    let swift = swift_type(type_name, ctx);
    if swift == "String" {
        format!("public let {name}: String = {}", string_literal(value))
    } else {
        format!("public let {name}: {swift} = {value}")
    }
}

fn stored_properties(b: SwiftBuilder, fields: &[Field], ctx: &GenerationContext) -> SwiftBuilder {
    b.each(fields.iter().filter(|f| !f.private), |b, f| {
        b.line(&format!(
            "public var {}: {}",
            to_camel_case(&f.name),
            swift_type(&f.type_name, ctx)
        ))
    })
}

fn function(
    decl: &Declaration,
    signature: &Signature,
    ctx: &GenerationContext,
    code: SwiftBuilder,
) -> SwiftBuilder {
    let params = signature
        .params
        .iter()
        .map(|p| {
            let escaping = if ctx.filters().is_callback_name(&p.type_name) {
                "@escaping "
            } else {
                ""
            };
            format!(
                "{}: {escaping}{}",
                to_camel_case(&p.name),
                swift_type(&p.type_name, ctx)
            )
        })
        .collect::<Vec<_>>()
        .join(", ");
    let modifiers = if ctx.filters().is_overridden(&decl.name) {
        "public override"
    } else {
        "public"
    };
    let name = to_camel_case(decl.display_name());
    let header = match signature.returns.as_deref() {
        None | Some("none") => format!("{modifiers} func {name}({params}) {{"),
        Some(_) => format!(
            "{modifiers} func {name}({params}) -> {} {{",
            return_type(signature, ctx)
        ),
    };
    code.block(&header, "}", |b| b.line("fatalError(\"not bound\")"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use girgen_ir::{Module, Param, Registry};

    use super::*;
    use crate::Configuring;

    fn context(configure: impl FnOnce(&mut Configuring)) -> Arc<GenerationContext> {
        let mut registry = Registry::new();
        registry.preload(&Module::new("GLib").with(Declaration::new("Variant", DeclKind::record())));
        let mut configuring = Configuring::new("Test", registry);
        configure(&mut configuring);
        configuring.freeze().0
    }

    fn synthesize(decl: &Declaration, ctx: &GenerationContext) -> String {
        SkeletonSynthesizer.synthesize(decl, ctx)
    }

    #[test]
    fn test_alias() {
        let ctx = context(|_| {});
        let decl = Declaration::new("Type", DeclKind::Alias {
            target: "gsize".to_string(),
        });
        assert_eq!(synthesize(&decl, &ctx), "public typealias Type = Int");
    }

    #[test]
    fn test_constants() {
        let ctx = context(|c| {
            c.filters.verbatim_constants.insert("PI".to_string());
        });
        let pi = Declaration::new("PI", DeclKind::Constant {
            type_name: "gdouble".to_string(),
            value: "3.14159".to_string(),
        });
        let name = Declaration::new("NAME", DeclKind::Constant {
            type_name: "utf8".to_string(),
            value: "glib".to_string(),
        });

        assert_eq!(synthesize(&pi, &ctx), "public let PI = 3.14159");
        assert_eq!(synthesize(&name, &ctx), "public let NAME: String = \"glib\"");
    }

    #[test]
    fn test_enumeration() {
        let ctx = context(|_| {});
        let decl = Declaration::new("Priority", DeclKind::Enumeration {
            members: vec![
                Member {
                    name: "low".to_string(),
                    value: 0,
                },
                Member {
                    name: "very_high".to_string(),
                    value: 2,
                },
            ],
        })
        .c_type("GPriority");

        insta::assert_snapshot!(synthesize(&decl, &ctx), @r"
        /// Wraps `GPriority`.
        public enum Priority: Int {
            case low = 0
            case veryHigh = 2
        }
        ");
    }

    #[test]
    fn test_record_skips_private_fields() {
        let ctx = context(|_| {});
        let decl = Declaration::new("Pair", DeclKind::Record {
            fields: vec![
                Field::new("first", "Variant"),
                Field::new("second_value", "gint"),
                Field::new("priv", "PairPrivate").private(),
            ],
        });

        insta::assert_snapshot!(synthesize(&decl, &ctx), @r"
        public struct Pair {
            public var first: VariantRef
            public var secondValue: Int32
        }
        ");
    }

    #[test]
    fn test_class_with_replaced_parent() {
        let ctx = context(|c| {
            c.filters
                .namespace_replacements
                .insert("GObject".to_string(), "GLibObject".to_string());
        });
        let decl = Declaration::new("Widget", DeclKind::Class {
            parent: Some("GObject.InitiallyUnowned".to_string()),
            fields: vec![],
        });
        assert_eq!(
            synthesize(&decl, &ctx),
            "open class Widget: GLibObject.InitiallyUnowned {\n}"
        );
    }

    #[test]
    fn test_function_escapes_callbacks() {
        let ctx = context(|_| {});
        let decl = Declaration::new("idle_add", DeclKind::Function {
            signature: Signature {
                params: vec![
                    Param {
                        name: "function".to_string(),
                        type_name: "SourceFunc".to_string(),
                    },
                    Param {
                        name: "user_data".to_string(),
                        type_name: "gpointer".to_string(),
                    },
                ],
                returns: Some("guint".to_string()),
            },
        });

        insta::assert_snapshot!(synthesize(&decl, &ctx), @r#"
        public func idleAdd(function: @escaping SourceFunc, userData: UnsafeMutableRawPointer?) -> UInt32 {
            fatalError("not bound")
        }
        "#);
    }

    #[test]
    fn test_overridden_function_gets_override_keyword() {
        let ctx = context(|c| {
            c.filters.overrides.insert("get_name".to_string());
        });
        let decl = Declaration::new("get_name", DeclKind::Function {
            signature: Signature {
                params: vec![],
                returns: Some("utf8".to_string()),
            },
        });

        insta::assert_snapshot!(synthesize(&decl, &ctx), @r#"
        public override func getName() -> String {
            fatalError("not bound")
        }
        "#);
    }

    #[test]
    fn test_overridden_type_is_still_generated() {
        let ctx = context(|c| {
            c.filters.overrides.insert("Action".to_string());
        });
        let decl = Declaration::new("Action", DeclKind::interface());
        assert!(synthesize(&decl, &ctx).contains("public protocol Action"));
    }
}
