use ocg_core::ir::{
    ActionGroup, CleanFn, HttpMethod, IrAction, IrInput, KeyMapping, RAW_REQUEST_ACTION_KEY,
    UrlPart,
};
use ocg_core::transform::SeenKeys;

use super::{SPECTRAL, SPECTRAL_HTTP};
use crate::source::{
    ArrowBody, Binding, SourceFile, TemplatePart, TsConst, TsExpr, TsImport, TsProp, TsStmt,
};

/// Names imported into every group module; action bindings must avoid them.
const GROUP_IMPORTS: [&str; 4] = ["action", "input", "util", CLIENT_FACTORY];

const CLIENT_FACTORY: &str = "createClient";
/// Import alias for the factory when an input takes its name. Sanitized
/// input keys never start with `_`.
const CLIENT_FACTORY_ALIAS: &str = "_createClient";

/// File stem for each group, in group order. Stems equal the group tag
/// unless the tag is taken, e.g. by the `index` module.
pub fn group_stems(groups: &[ActionGroup<'_>]) -> Vec<String> {
    let mut taken = SeenKeys::empty().reserve("index");
    let mut stems = Vec::with_capacity(groups.len());
    for group in groups {
        let stem = if taken.contains(&group.tag) {
            let (stem, claimed) = taken.claim(&group.tag);
            taken = claimed;
            stem
        } else {
            taken = taken.reserve(&group.tag);
            group.tag.clone()
        };
        stems.push(stem);
    }
    stems
}

/// Emit `src/actions/<stem>.ts`: one `action(...)` per member, default
/// exported as an object keyed by action key.
pub fn emit_action_group(group: &ActionGroup<'_>) -> String {
    let shadowed = group
        .actions
        .iter()
        .any(|action| action.inputs.contains_key(CLIENT_FACTORY));
    let (factory, factory_import) = if shadowed {
        (
            CLIENT_FACTORY_ALIAS,
            format!("{CLIENT_FACTORY} as {CLIENT_FACTORY_ALIAS}"),
        )
    } else {
        (CLIENT_FACTORY, CLIENT_FACTORY.to_string())
    };

    let mut file = SourceFile {
        imports: vec![
            TsImport::named(&["action", "input", "util"], SPECTRAL),
            TsImport::named(&[factory_import.as_str()], "../client"),
        ],
        ..SourceFile::default()
    };

    let mut members = Vec::new();
    for action in &group.actions {
        let binding = binding_name(&action.key);
        members.push(if binding == action.key {
            TsProp::Shorthand(binding.clone())
        } else {
            TsProp::KeyValue(action.key.clone(), TsExpr::Ident(binding.clone()))
        });
        file.declarations.push(TsConst {
            exported: false,
            name: binding,
            value: action_expr(action, factory),
        });
    }
    file.default_export = Some(TsExpr::Object(members));

    file.render()
}

/// Emit `src/actions/index.ts`, merging every group plus the raw request
/// action.
pub fn emit_actions_index(stems: &[String]) -> String {
    let mut file = SourceFile {
        imports: vec![
            TsImport::named(&["buildRawRequestAction"], SPECTRAL_HTTP),
            TsImport::named(&["baseUrl"], "../client"),
        ],
        ..SourceFile::default()
    };

    let mut members = Vec::new();
    for stem in stems {
        let ident = format!("{stem}Actions");
        file.imports
            .push(TsImport::default_import(&ident, &format!("./{stem}")));
        members.push(TsProp::Spread(TsExpr::Ident(ident)));
    }
    members.push(TsProp::KeyValue(
        RAW_REQUEST_ACTION_KEY.to_string(),
        TsExpr::call("buildRawRequestAction", vec![TsExpr::ident("baseUrl")]),
    ));
    file.default_export = Some(TsExpr::Object(members));

    file.render()
}

fn binding_name(key: &str) -> String {
    if GROUP_IMPORTS.contains(&key) {
        format!("{key}Action")
    } else {
        key.to_string()
    }
}

fn action_expr(action: &IrAction, factory: &str) -> TsExpr {
    let mut display = vec![
        ("label".to_string(), TsExpr::str(&action.display.label)),
        (
            "description".to_string(),
            TsExpr::str(&action.display.description),
        ),
    ];
    if let Some(ref icon) = action.display.icon_path {
        display.push(("iconPath".to_string(), TsExpr::str(icon)));
    }

    let inputs = action
        .inputs
        .iter()
        .map(|(key, input)| (key.clone(), input_expr(input)));

    TsExpr::call(
        "action",
        vec![TsExpr::object([
            ("display".to_string(), TsExpr::object(display)),
            ("inputs".to_string(), TsExpr::object(inputs)),
            ("perform".to_string(), perform_expr(action, factory)),
        ])],
    )
}

fn input_expr(input: &IrInput) -> TsExpr {
    let mut props = vec![
        ("label".to_string(), TsExpr::str(&input.label)),
        ("type".to_string(), TsExpr::str(input.input_type.as_str())),
    ];
    if let Some(required) = input.required {
        props.push(("required".to_string(), TsExpr::Bool(required)));
    }
    if let Some(ref comments) = input.comments {
        props.push(("comments".to_string(), TsExpr::str(comments)));
    }
    if let Some(ref default) = input.default {
        props.push(("default".to_string(), TsExpr::str(default)));
    }
    if let Some(ref example) = input.example {
        props.push(("example".to_string(), TsExpr::str(example)));
    }
    if let Some(ref model) = input.model {
        let choices = model.iter().map(|choice| {
            TsExpr::object([
                ("label".to_string(), TsExpr::str(&choice.label)),
                ("value".to_string(), TsExpr::str(&choice.value)),
            ])
        });
        props.push(("model".to_string(), TsExpr::Array(choices.collect())));
    }
    if let Some(clean) = input.clean {
        props.push(("clean".to_string(), clean_expr(clean.function, clean.coalesce_falsy)));
    }
    TsExpr::call("input", vec![TsExpr::object(props)])
}

fn clean_expr(function: CleanFn, coalesce_falsy: bool) -> TsExpr {
    let helper = TsExpr::ident("util")
        .member("types")
        .member(function.helper_name());
    if !coalesce_falsy {
        return helper;
    }
    TsExpr::Arrow {
        is_async: false,
        params: vec![Binding::Ident("value".to_string())],
        body: ArrowBody::Expr(Box::new(TsExpr::Or(
            Box::new(TsExpr::Call {
                callee: Box::new(helper),
                args: vec![TsExpr::ident("value")],
            }),
            Box::new(TsExpr::ident("undefined")),
        ))),
    }
}

/// Local names inside `perform`, moved aside when an input already uses them.
struct Locals {
    context: String,
    client: String,
    body: String,
    params: String,
    data: String,
}

impl Locals {
    fn for_action(action: &IrAction) -> Self {
        let local = |name: &str| {
            if action.inputs.contains_key(name) {
                format!("_{name}")
            } else {
                name.to_string()
            }
        };
        Self {
            context: local("context"),
            client: local("client"),
            body: local("body"),
            params: local("params"),
            data: local("data"),
        }
    }
}

fn prop(key: &str, local: &str) -> TsProp {
    if key == local {
        TsProp::Shorthand(key.to_string())
    } else {
        TsProp::KeyValue(key.to_string(), TsExpr::ident(local))
    }
}

fn mapping_object(mappings: &[KeyMapping]) -> TsExpr {
    TsExpr::Object(
        mappings
            .iter()
            .map(|m| prop(&m.upstream_key, &m.key))
            .collect(),
    )
}

fn url_expr(parts: &[UrlPart]) -> TsExpr {
    if parts.iter().all(|p| matches!(p, UrlPart::Literal(_))) {
        let text: String = parts
            .iter()
            .map(|p| match p {
                UrlPart::Literal(text) | UrlPart::Input(text) => text.as_str(),
            })
            .collect();
        return TsExpr::Str(text);
    }
    TsExpr::Template(
        parts
            .iter()
            .map(|part| match part {
                UrlPart::Literal(text) => TemplatePart::Static(text.clone()),
                UrlPart::Input(key) => TemplatePart::Dynamic(TsExpr::ident(key)),
            })
            .collect(),
    )
}

fn perform_expr(action: &IrAction, factory: &str) -> TsExpr {
    let plan = &action.perform;
    let locals = Locals::for_action(action);
    let mut body = vec![TsStmt::Const {
        binding: Binding::Ident(locals.client.clone()),
        value: TsExpr::call(factory, vec![TsExpr::ident(IrInput::CONNECTION_KEY)]),
    }];

    if let Some(ref mappings) = plan.body {
        body.push(TsStmt::Const {
            binding: Binding::Ident(locals.body.clone()),
            value: mapping_object(mappings),
        });
    }
    if let Some(ref mappings) = plan.query {
        body.push(TsStmt::Const {
            binding: Binding::Ident(locals.params.clone()),
            value: mapping_object(mappings),
        });
    }

    let url = url_expr(&plan.url);
    let params = plan
        .query
        .as_ref()
        .map(|_| TsExpr::Object(vec![prop("params", &locals.params)]));
    let client = TsExpr::ident(&locals.client);

    let call = match plan.method {
        HttpMethod::Trace => {
            let mut options = vec![
                TsProp::KeyValue("method".to_string(), TsExpr::str("trace")),
                TsProp::KeyValue("url".to_string(), url),
            ];
            if plan.query.is_some() {
                options.push(prop("params", &locals.params));
            }
            TsExpr::Call {
                callee: Box::new(client.member("request")),
                args: vec![TsExpr::Object(options)],
            }
        }
        method => {
            let mut args = vec![url];
            if plan.body.is_some() {
                args.push(TsExpr::ident(&locals.body));
            }
            args.extend(params);
            TsExpr::Call {
                callee: Box::new(client.member(method.as_str())),
                args,
            }
        }
    };

    let data_binding = if locals.data == "data" {
        "data".to_string()
    } else {
        format!("data: {}", locals.data)
    };
    body.push(TsStmt::Const {
        binding: Binding::Object(vec![data_binding]),
        value: TsExpr::Await(Box::new(call)),
    });
    body.push(TsStmt::Return(TsExpr::Object(vec![prop("data", &locals.data)])));

    TsExpr::Arrow {
        is_async: true,
        params: vec![
            Binding::Ident(locals.context),
            Binding::Object(action.inputs.keys().cloned().collect()),
        ],
        body: ArrowBody::Block(body),
    }
}
