/// Generate src/middleware/validation.ts: turns express-validator results
/// into a 400 response.
pub(super) fn validation() -> String {
    r#"import { NextFunction, Request, RequestHandler, Response } from 'express';
import { validationResult } from 'express-validator';

export const validateRequest = (req: Request, res: Response, next: NextFunction) => {
  const errors = validationResult(req);
  if (!errors.isEmpty()) {
    res.status(400).json({
      success: false,
      message: 'Validation failed',
      errors: errors.array(),
    });
    return;
  }
  next();
};

export const asyncHandler =
  (fn: (req: Request, res: Response, next: NextFunction) => Promise<unknown>): RequestHandler =>
  (req, res, next) => {
    Promise.resolve(fn(req, res, next)).catch(next);
  };
"#
    .to_string()
}

/// Generate src/middleware/auth.ts: a bearer-token check.
///
/// Stand-in only: the secret falls back to a fixed development value.
pub(super) fn auth() -> String {
    r#"import { NextFunction, Request, Response } from 'express';
import jwt from 'jsonwebtoken';

export interface AuthRequest extends Request {
  user?: string | jwt.JwtPayload;
}

export const authenticateToken = (req: AuthRequest, res: Response, next: NextFunction) => {
  const header = req.headers.authorization;
  const token = header?.split(' ')[1];

  if (!token) {
    res.status(401).json({ success: false, message: 'Access token required' });
    return;
  }

  jwt.verify(token, process.env.JWT_SECRET ?? 'development-secret', (err, payload) => {
    if (err || payload === undefined) {
      res.status(403).json({ success: false, message: 'Invalid or expired token' });
      return;
    }
    req.user = payload;
    next();
  });
};
"#
    .to_string()
}
