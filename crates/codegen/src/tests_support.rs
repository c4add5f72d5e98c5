use ferry_interchange::{
    hints, ApiEndpointSpec, ComponentKind, ComponentSpec, HttpMethod, MigrationIntent, RouteSpec,
    StateManagementRecommendation, ValidationMarker, ValidationRuleSpec,
};

pub fn empty_intent() -> MigrationIntent {
    MigrationIntent {
        components: vec![],
        endpoints: vec![],
        state_management: StateManagementRecommendation {
            solution: hints::LOCAL_STATE.to_string(),
            session_strategy: hints::SESSION_STRATEGY.to_string(),
            form_state_strategy: hints::FORM_STATE_STRATEGY.to_string(),
            global_entities: vec![],
        },
        routing: vec![],
        validation_rules: Default::default(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Two pages, two endpoints and one validated bean.
pub fn sample_intent() -> MigrationIntent {
    let mut intent = empty_intent();
    intent.components = vec![
        ComponentSpec {
            name: "Welcome".to_string(),
            kind: ComponentKind::Display,
            source_file: "src/main/webapp/jsp/welcome.jsp".to_string(),
            title: "Welcome to TruckLease".to_string(),
            state_fields: vec![],
            validation_required: true,
            props: vec![],
            suggested_libraries: vec![],
        },
        ComponentSpec {
            name: "ApplicantInfo".to_string(),
            kind: ComponentKind::Form,
            source_file: "src/main/webapp/jsp/applicant-info.jsp".to_string(),
            title: "Applicant Information".to_string(),
            state_fields: strings(&["firstName", "email", "phone", "ssn", "state", "hasCDL", "notes"]),
            validation_required: true,
            props: strings(&["loading", "onSubmit", "errors"]),
            suggested_libraries: strings(&[hints::FORM_LIBRARY, hints::SELECT_WIDGET]),
        },
    ];
    intent.endpoints = vec![
        ApiEndpointSpec {
            path: "/welcome".to_string(),
            method: HttpMethod::Get,
            source_handler: "com.trucklease.actions.WelcomeAction".to_string(),
            form_bean: None,
            validation_required: false,
            responses: strings(&["success"]),
            suggested_middleware: strings(&[hints::CORS_MIDDLEWARE]),
        },
        ApiEndpointSpec {
            path: "/applicant-info".to_string(),
            method: HttpMethod::Post,
            source_handler: "com.trucklease.actions.ApplicantInfoAction".to_string(),
            form_bean: Some("applicantForm".to_string()),
            validation_required: true,
            responses: strings(&["success", "failure"]),
            suggested_middleware: strings(&[hints::VALIDATION_MIDDLEWARE, hints::CORS_MIDDLEWARE]),
        },
    ];
    intent.routing = vec![
        RouteSpec {
            path: "/".to_string(),
            component: "Welcome".to_string(),
            protected: false,
            redirect_rules: Default::default(),
        },
        RouteSpec {
            path: "/welcome".to_string(),
            component: "Welcome".to_string(),
            protected: false,
            redirect_rules: [("success".to_string(), "/jsp/welcome.jsp".to_string())]
                .into_iter()
                .collect(),
        },
        RouteSpec {
            path: "/applicant-info".to_string(),
            component: "ApplicantInfo".to_string(),
            protected: true,
            redirect_rules: [("success".to_string(), "/welcome.do".to_string())]
                .into_iter()
                .collect(),
        },
    ];
    intent.validation_rules.insert(
        "applicantForm".to_string(),
        ValidationRuleSpec {
            fields: strings(&["firstName", "email", "phone", "hasCDL"]),
            rules: vec![ValidationMarker::ServerSideValidation],
            suggested_library: hints::SCHEMA_LIBRARY.to_string(),
        },
    );
    intent.state_management.global_entities = strings(&["applicantForm"]);
    intent
}
