//! Project manifest and application shell files.

use std::collections::BTreeMap;

use ferry_core::config::FrontendConfig;
use ferry_interchange::{hints, MigrationIntent};

use crate::template::{json_entries, json_string};

const DEPENDENCIES: [(&str, &str); 8] = [
    ("@hookform/resolvers", "^3.1.0"),
    ("@tanstack/react-query", "^4.24.0"),
    ("axios", "^1.3.0"),
    ("react", "^18.2.0"),
    ("react-dom", "^18.2.0"),
    ("react-hook-form", "^7.43.0"),
    ("react-router-dom", "^6.8.0"),
    ("yup", "^1.0.0"),
];

const DEV_DEPENDENCIES: [(&str, &str); 8] = [
    ("@types/react", "^18.0.0"),
    ("@types/react-dom", "^18.0.0"),
    ("@vitejs/plugin-react", "^3.1.0"),
    ("autoprefixer", "^10.4.13"),
    ("postcss", "^8.4.21"),
    ("tailwindcss", "^3.2.0"),
    ("typescript", "^4.9.0"),
    ("vite", "^4.1.0"),
];

/// Version pinned for each library hint a component may suggest.
fn suggested_version(library: &str) -> Option<&'static str> {
    match library {
        hints::SELECT_WIDGET => Some("^5.7.0"),
        hints::TABLE_WIDGET => Some("^8.7.0"),
        hints::FORM_LIBRARY => Some("^7.43.0"),
        _ => None,
    }
}

/// Generate package.json; dependencies are the base set plus every library
/// the components suggest.
pub(super) fn package_json(config: &FrontendConfig, intent: &MigrationIntent) -> String {
    let mut dependencies: BTreeMap<&str, &str> = DEPENDENCIES.into_iter().collect();
    for library in intent.suggested_libraries() {
        match suggested_version(library) {
            Some(version) => {
                dependencies.entry(library).or_insert(version);
            }
            None => tracing::debug!(library, "no pinned version for suggested library; skipping"),
        }
    }

    format!(
        r#"{{
  "name": {name},
  "version": "0.1.0",
  "private": true,
  "type": "module",
  "scripts": {{
    "dev": "vite",
    "build": "tsc && vite build",
    "preview": "vite preview"
  }},
  "dependencies": {{
{dependencies}
  }},
  "devDependencies": {{
{dev_dependencies}
  }}
}}
"#,
        name = json_string(&config.package_name),
        dependencies = json_entries(dependencies, 2),
        dev_dependencies = json_entries(DEV_DEPENDENCIES, 2),
    )
}

/// Generate tsconfig.json content.
pub(super) fn tsconfig_json() -> String {
    r#"{
  "compilerOptions": {
    "target": "ES2020",
    "useDefineForClassFields": true,
    "lib": ["ES2020", "DOM", "DOM.Iterable"],
    "module": "ESNext",
    "skipLibCheck": true,
    "moduleResolution": "node",
    "resolveJsonModule": true,
    "isolatedModules": true,
    "noEmit": true,
    "jsx": "react-jsx",
    "strict": true,
    "noUnusedLocals": true,
    "noUnusedParameters": true,
    "noFallthroughCasesInSwitch": true
  },
  "include": ["src"]
}
"#
    .to_string()
}

/// Generate vite.config.ts content.
pub(super) fn vite_config() -> String {
    r#"import { defineConfig } from 'vite';
import react from '@vitejs/plugin-react';

export default defineConfig({
  plugins: [react()],
  server: {
    port: 3000,
  },
});
"#
    .to_string()
}

pub(super) fn tailwind_config() -> String {
    r#"/** @type {import('tailwindcss').Config} */
export default {
  content: ['./index.html', './src/**/*.{ts,tsx}'],
  theme: {
    extend: {},
  },
  plugins: [],
};
"#
    .to_string()
}

pub(super) fn postcss_config() -> String {
    r#"export default {
  plugins: {
    tailwindcss: {},
    autoprefixer: {},
  },
};
"#
    .to_string()
}

/// Generate index.html content.
pub(super) fn index_html(title: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{title}</title>
  </head>
  <body>
    <div id="root"></div>
    <script type="module" src="/src/main.tsx"></script>
  </body>
</html>
"#,
        title = html_escape(title),
    )
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Generate src/main.tsx content.
pub(super) fn main_tsx() -> String {
    r#"import React from 'react';
import ReactDOM from 'react-dom/client';
import App from './App';

ReactDOM.createRoot(document.getElementById('root')!).render(
  <React.StrictMode>
    <App />
  </React.StrictMode>
);
"#
    .to_string()
}

pub(super) fn vite_env() -> String {
    r#"/// <reference types="vite/client" />

interface ImportMetaEnv {
  readonly VITE_API_URL?: string;
}

interface ImportMeta {
  readonly env: ImportMetaEnv;
}
"#
    .to_string()
}

/// Generate src/App.tsx: query client provider around the router.
pub(super) fn app_tsx() -> String {
    r#"import React from 'react';
import { QueryClient, QueryClientProvider } from '@tanstack/react-query';
import AppRouter from './AppRouter';
import './index.css';

const queryClient = new QueryClient();

const App: React.FC = () => {
  return (
    <QueryClientProvider client={queryClient}>
      <div className="App min-h-screen bg-gray-50">
        <AppRouter />
      </div>
    </QueryClientProvider>
  );
};

export default App;
"#
    .to_string()
}

pub(super) fn index_css() -> String {
    r#"@tailwind base;
@tailwind components;
@tailwind utilities;

@layer base {
  html {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Roboto', sans-serif;
  }
}

@layer components {
  .btn {
    @apply px-4 py-2 rounded-md font-medium focus:outline-none focus:ring-2;
  }

  .btn-primary {
    @apply bg-blue-600 text-white hover:bg-blue-700 focus:ring-blue-500;
  }

  .btn-secondary {
    @apply bg-gray-200 text-gray-900 hover:bg-gray-300 focus:ring-gray-500;
  }

  .form-input {
    @apply w-full px-3 py-2 border border-gray-300 rounded-md focus:outline-none focus:ring-2 focus:ring-blue-500;
  }
}
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests_support::{empty_intent, sample_intent};

    #[test]
    fn test_package_json_adds_suggested_libraries() {
        let json = package_json(&FrontendConfig::default(), &sample_intent());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "migrated-frontend");
        assert_eq!(value["dependencies"]["react-select"], "^5.7.0");
        assert_eq!(value["dependencies"]["react-hook-form"], "^7.43.0");
        assert!(value["dependencies"].get("@tanstack/react-table").is_none());
        assert_eq!(value["devDependencies"]["vite"], "^4.1.0");
    }

    #[test]
    fn test_package_json_base_set_is_valid_json() {
        let config = FrontendConfig {
            package_name: "lease \"portal\"".to_string(),
            ..FrontendConfig::default()
        };
        let json = package_json(&config, &empty_intent());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "lease \"portal\"");
        assert_eq!(value["dependencies"].as_object().unwrap().len(), DEPENDENCIES.len());
    }

    #[test]
    fn test_index_html_escapes_title() {
        assert!(index_html("Fees & <Terms>").contains("<title>Fees &amp; &lt;Terms&gt;</title>"));
    }
}
