//! Job dependency graph built from `needs` lists

use std::collections::{HashMap, HashSet, VecDeque};

use crate::workflow::Workflow;

/// Graph of job dependencies
///
/// Edges point from a needed job to the jobs that need it, so traversal
/// follows the order jobs become runnable in.
pub struct DependencyGraph {
    /// job_id -> jobs that need it
    dependents: HashMap<String, Vec<String>>,
    /// job_id -> its needs
    dependencies: HashMap<String, Vec<String>>,
    /// All job ids, in workflow order
    job_ids: Vec<String>,
}

impl DependencyGraph {
    pub fn from_workflow(workflow: &Workflow) -> Self {
        let capacity = workflow.jobs.len();
        let mut dependents: HashMap<String, Vec<String>> = HashMap::with_capacity(capacity);
        let mut dependencies: HashMap<String, Vec<String>> = HashMap::with_capacity(capacity);
        let mut job_ids: Vec<String> = Vec::with_capacity(capacity);

        for id in workflow.jobs.keys() {
            job_ids.push(id.to_string());
            dependents.insert(id.to_string(), Vec::new());
            dependencies.insert(id.to_string(), Vec::new());
        }

        for (id, job) in &workflow.jobs {
            for needed in &job.needs {
                dependents
                    .entry(needed.to_string())
                    .or_default()
                    .push(id.to_string());
                dependencies
                    .entry(id.to_string())
                    .or_default()
                    .push(needed.to_string());
            }
        }

        Self {
            dependents,
            dependencies,
            job_ids,
        }
    }

    /// Get the needs of a job
    #[inline]
    pub fn dependencies(&self, job_id: &str) -> &[String] {
        static EMPTY: &[String] = &[];
        self.dependencies
            .get(job_id)
            .map(|v| v.as_slice())
            .unwrap_or(EMPTY)
    }

    /// Get the jobs that need the given job
    #[inline]
    pub fn dependents(&self, job_id: &str) -> &[String] {
        static EMPTY: &[String] = &[];
        self.dependents
            .get(job_id)
            .map(|v| v.as_slice())
            .unwrap_or(EMPTY)
    }

    /// Check if `to` is reachable from `from` along dependency edges (BFS)
    pub fn has_path(&self, from: &str, to: &str) -> bool {
        if from == to {
            return true;
        }

        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();

        queue.push_back(from);
        visited.insert(from);

        while let Some(current) = queue.pop_front() {
            if let Some(next) = self.dependents.get(current) {
                for neighbor in next {
                    if neighbor == to {
                        return true;
                    }
                    if visited.insert(neighbor.as_str()) {
                        queue.push_back(neighbor.as_str());
                    }
                }
            }
        }

        false
    }

    /// Find a dependency cycle, if any, as the path of job ids walked
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut on_stack: Vec<&str> = Vec::new();

        for start in &self.job_ids {
            if visited.contains(start.as_str()) {
                continue;
            }
            if let Some(cycle) = self.dfs_cycle(start, &mut visited, &mut on_stack) {
                return Some(cycle);
            }
        }

        None
    }

    fn dfs_cycle<'a>(
        &'a self,
        node: &'a str,
        visited: &mut HashSet<&'a str>,
        on_stack: &mut Vec<&'a str>,
    ) -> Option<Vec<String>> {
        if let Some(pos) = on_stack.iter().position(|n| *n == node) {
            let mut cycle: Vec<String> = on_stack[pos..].iter().map(|s| s.to_string()).collect();
            cycle.push(node.to_string());
            return Some(cycle);
        }
        if visited.contains(node) {
            return None;
        }

        visited.insert(node);
        on_stack.push(node);
        if let Some(next) = self.dependents.get(node) {
            for neighbor in next {
                if let Some(cycle) = self.dfs_cycle(neighbor, visited, on_stack) {
                    return Some(cycle);
                }
            }
        }
        on_stack.pop();

        None
    }

    /// Topological build order (Kahn's algorithm); None if the graph has a cycle
    pub fn build_order(&self) -> Option<Vec<String>> {
        let mut in_degree: HashMap<&str, usize> = self
            .job_ids
            .iter()
            .map(|id| (id.as_str(), self.dependencies(id).len()))
            .collect();

        let mut queue: VecDeque<&str> = self
            .job_ids
            .iter()
            .map(String::as_str)
            .filter(|id| in_degree[id] == 0)
            .collect();

        let mut order = Vec::with_capacity(self.job_ids.len());
        while let Some(current) = queue.pop_front() {
            order.push(current.to_string());
            for dependent in self.dependents(current) {
                let degree = in_degree.get_mut(dependent.as_str())?;
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(dependent.as_str());
                }
            }
        }

        if order.len() == self.job_ids.len() {
            Some(order)
        } else {
            None
        }
    }
}
