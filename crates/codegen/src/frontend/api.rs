use ferry_core::naming::pascal_case;
use ferry_interchange::{ApiEndpointSpec, HttpMethod, MigrationIntent};

use crate::template::{ts_string, CodeWriter, LocalNames};

const CLIENT_PREAMBLE: &str = r#"const api = axios.create({
  baseURL: API_BASE_URL,
  headers: {
    'Content-Type': 'application/json',
  },
});

export interface ApiResponse<T = unknown> {
  success: boolean;
  data?: T;
  message?: string;
  nextStep?: string;
}

export type Payload = Record<string, unknown>;

api.interceptors.request.use((config) => {
  const token = localStorage.getItem('authToken');
  if (token) {
    config.headers.Authorization = `Bearer ${token}`;
  }
  return config;
});

api.interceptors.response.use(
  (response) => response,
  (error) => {
    if (error.response?.status === 401) {
      localStorage.removeItem('authToken');
      window.location.href = '/';
    }
    return Promise.reject(error);
  }
);"#;

/// Client function name for an endpoint: `postApplicantInfo`, `getRoot`.
fn function_name(endpoint: &ApiEndpointSpec) -> String {
    let stem = if endpoint.domain().is_none() {
        "Root".to_string()
    } else {
        pascal_case(&endpoint.path)
    };
    format!("{}{}", endpoint.method.verb(), stem)
}

/// Generate src/utils/api.ts: an axios instance plus one call per endpoint.
pub(super) fn api_client(intent: &MigrationIntent, base_url: &str) -> String {
    let mut w = CodeWriter::new();
    w.line("import axios from 'axios';");
    w.blank();
    w.line(format!(
        "const API_BASE_URL = import.meta.env.VITE_API_URL ?? {};",
        ts_string(base_url)
    ));
    w.blank();
    w.lines(CLIENT_PREAMBLE);

    let mut names = LocalNames::new();
    for endpoint in &intent.endpoints {
        let name = names.claim(&function_name(endpoint), &endpoint.path);
        let path = ts_string(&endpoint.path);
        w.blank();
        match endpoint.method {
            HttpMethod::Post => {
                w.block(
                    format!("export const {name} = async (data: Payload): Promise<ApiResponse> => {{"),
                    "};",
                    |w| {
                        w.line(format!("const response = await api.post<ApiResponse>({path}, data);"));
                        w.line("return response.data;");
                    },
                );
            }
            HttpMethod::Get => {
                w.block(
                    format!("export const {name} = async (): Promise<ApiResponse> => {{"),
                    "};",
                    |w| {
                        w.line(format!("const response = await api.get<ApiResponse>({path});"));
                        w.line("return response.data;");
                    },
                );
            }
        }
    }
    w.blank();
    w.line("export default api;");
    w.finish()
}
