// file: src/server/page.rs
// description: static landing page served at the root path

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>AI Code Review &amp; Issue Fixer</title>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        #result {
            max-height: 300px;
            overflow-y: auto;
            white-space: pre-wrap;
            word-wrap: break-word;
            border: 1px solid #ddd;
            padding: 10px;
            border-radius: 8px;
            background-color: #f9f9f9;
        }
    </style>
</head>
<body class="bg-gray-100 flex justify-center items-center h-screen">
    <div class="bg-white p-8 rounded-lg shadow-lg w-96">
        <h1 class="text-2xl font-bold text-center mb-4">AI Code Review &amp; Issue Fixer</h1>
        <input id="repo_url" type="text" placeholder="GitHub Repository URL" class="w-full p-2 border rounded mb-4">
        <button onclick="reviewCode()" class="bg-blue-500 text-white px-4 py-2 rounded w-full">Analyze Code</button>
        <button onclick="analyzeSentry()" class="bg-red-500 text-white px-4 py-2 rounded w-full mt-2">Analyze Sentry Logs</button>
        <div id="result" class="mt-4 text-sm"></div>
    </div>
    <script>
        function show(data) {
            const pre = document.createElement("pre");
            pre.textContent = JSON.stringify(data, null, 2);
            const result = document.getElementById("result");
            result.replaceChildren(pre);
        }
        async function reviewCode() {
            const repoUrl = document.getElementById("repo_url").value;
            if (!repoUrl) {
                alert("Please enter a repository URL.");
                return;
            }
            document.getElementById("result").textContent = "Analyzing repository...";
            const response = await fetch(`/review_code?repo_url=${encodeURIComponent(repoUrl)}`);
            show(await response.json());
        }
        async function analyzeSentry() {
            document.getElementById("result").textContent = "Analyzing Sentry logs...";
            const response = await fetch(`/analyze_sentry`);
            show(await response.json());
        }
    </script>
</body>
</html>
"#;
