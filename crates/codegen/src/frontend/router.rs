use ferry_interchange::MigrationIntent;

use crate::template::{jsx_attr, CodeWriter};

/// Generate src/AppRouter.tsx: one `<Route>` per routing entry, protected
/// routes wrapped in the access guard.
pub(super) fn app_router(intent: &MigrationIntent) -> String {
    let mut imported: Vec<&str> = Vec::new();
    for route in &intent.routing {
        if !imported.contains(&route.component.as_str()) {
            imported.push(&route.component);
        }
    }
    let any_protected = intent.routing.iter().any(|r| r.protected);

    let mut w = CodeWriter::new();
    w.line("import React from 'react';");
    w.line("import { BrowserRouter as Router, Routes, Route } from 'react-router-dom';");
    if any_protected {
        w.line("import ProtectedRoute from './components/ProtectedRoute';");
    }
    for name in &imported {
        w.line(format!("import {name} from './pages/{name}';"));
    }
    w.blank();
    w.block("const AppRouter: React.FC = () => {", "};", |w| {
        w.block("return (", ");", |w| {
            w.block("<Router>", "</Router>", |w| {
                w.block("<Routes>", "</Routes>", |w| {
                    for route in &intent.routing {
                        let element = if route.protected {
                            format!("<ProtectedRoute><{} /></ProtectedRoute>", route.component)
                        } else {
                            format!("<{} />", route.component)
                        };
                        w.line(format!(
                            "<Route path={} element={{{}}} />",
                            jsx_attr(&route.path),
                            element
                        ));
                    }
                });
            });
        });
    });
    w.blank();
    w.line("export default AppRouter;");
    w.finish()
}

/// Generate src/components/ProtectedRoute.tsx.
///
/// A stand-in guard that always renders its children. Authentication is left
/// to the migrated application.
pub(super) fn protected_route() -> String {
    r#"import React from 'react';

interface ProtectedRouteProps {
  children: React.ReactNode;
}

// Stand-in guard: renders every page. Replace with the application's real
// session check before exposing protected routes.
const ProtectedRoute: React.FC<ProtectedRouteProps> = ({ children }) => {
  return <>{children}</>;
};

export default ProtectedRoute;
"#
    .to_string()
}
