//! The data-access seam of the generated service.
//!
//! Controllers only see `Repository<T>`. The in-memory implementation is a
//! placeholder that owns its identifier sequence; nothing in the generated
//! code keeps module-level mutable state.

use ferry_core::naming::pascal_case;

/// `applicant` → `Applicant`.
pub(crate) fn entity_type(entity: &str) -> String {
    pascal_case(entity)
}

/// Generate src/repository/Repository.ts.
pub(super) fn contract() -> String {
    r#"export interface Entity {
  id: string;
  createdAt: string;
  updatedAt: string;
}

export type NewRecord<T extends Entity> = Omit<T, keyof Entity>;

/**
 * Storage capability handed to every controller. Implement this against a
 * real database to replace the in-memory placeholder.
 */
export interface Repository<T extends Entity> {
  create(data: NewRecord<T>): Promise<T>;
  findById(id: string): Promise<T | undefined>;
  findAll(): Promise<T[]>;
  update(id: string, changes: Partial<NewRecord<T>>): Promise<T | undefined>;
  delete(id: string): Promise<boolean>;
}

export interface SequenceGenerator {
  next(): string;
}

/** Monotonic identifiers starting at 1. */
export class CounterSequence implements SequenceGenerator {
  private current = 0;

  next(): string {
    this.current += 1;
    return String(this.current);
  }
}
"#
    .to_string()
}

/// Generate src/repository/InMemoryRepository.ts.
pub(super) fn in_memory() -> String {
    r#"import { CounterSequence, Entity, NewRecord, Repository, SequenceGenerator } from './Repository';

/**
 * PLACEHOLDER persistence. Records live in this process only and are lost on
 * restart; identifiers come from the sequence this instance owns. Provide
 * another Repository implementation for production use.
 */
export class InMemoryRepository<T extends Entity> implements Repository<T> {
  private readonly records: T[] = [];

  constructor(private readonly sequence: SequenceGenerator = new CounterSequence()) {}

  async create(data: NewRecord<T>): Promise<T> {
    const now = new Date().toISOString();
    const record = { ...data, id: this.sequence.next(), createdAt: now, updatedAt: now } as T;
    this.records.push(record);
    return record;
  }

  async findById(id: string): Promise<T | undefined> {
    return this.records.find((record) => record.id === id);
  }

  async findAll(): Promise<T[]> {
    return [...this.records];
  }

  async update(id: string, changes: Partial<NewRecord<T>>): Promise<T | undefined> {
    const index = this.records.findIndex((record) => record.id === id);
    if (index === -1) {
      return undefined;
    }
    const updated = {
      ...this.records[index],
      ...changes,
      id,
      updatedAt: new Date().toISOString(),
    } as T;
    this.records[index] = updated;
    return updated;
  }

  async delete(id: string): Promise<boolean> {
    const index = this.records.findIndex((record) => record.id === id);
    if (index === -1) {
      return false;
    }
    this.records.splice(index, 1);
    return true;
  }
}
"#
    .to_string()
}

/// Generate src/models/<entity>.ts: the record type and a repository factory.
pub(super) fn model(entity: &str) -> String {
    let ty = entity_type(entity);
    format!(
        r#"import {{ Entity, Repository }} from '../repository/Repository';
import {{ InMemoryRepository }} from '../repository/InMemoryRepository';

export interface {ty}Data extends Entity {{
  [field: string]: unknown;
}}

export const create{ty}Repository = (): Repository<{ty}Data> =>
  new InMemoryRepository<{ty}Data>();
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_exports_factory() {
        let ts = model("background");
        assert!(ts.contains("export interface BackgroundData extends Entity {"));
        assert!(ts.contains("export const createBackgroundRepository = (): Repository<BackgroundData> =>"));
        assert!(ts.contains("new InMemoryRepository<BackgroundData>();"));
    }

    #[test]
    fn test_in_memory_repository_owns_its_sequence() {
        let ts = in_memory();
        assert!(ts.contains("PLACEHOLDER"));
        assert!(ts.contains("private readonly sequence: SequenceGenerator = new CounterSequence()"));
        assert!(!ts.contains("static"));
    }
}
